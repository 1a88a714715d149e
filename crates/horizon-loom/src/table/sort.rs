//! Sort specification and the stable column sort.

use super::TableRow;

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Insertion order.
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// The next direction in the header-click cycle.
    pub fn cycle(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }
}

/// Which column the table is sorted by, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Sort by `column` in `direction`.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Insertion order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Whether rows keep their insertion order.
    pub fn is_unsorted(&self) -> bool {
        self.column.is_none() || self.direction == SortDirection::None
    }

    /// Apply a header click on `column`.
    ///
    /// Clicking the active column cycles None → Ascending → Descending → None;
    /// clicking another column makes it active at Ascending.
    pub fn click(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.direction = self.direction.cycle();
        } else {
            self.column = Some(column.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    /// The direction for `column`, `None` if it is not the active column.
    pub fn direction_for(&self, column: &str) -> SortDirection {
        if self.column.as_deref() == Some(column) {
            self.direction
        } else {
            SortDirection::None
        }
    }
}

/// Row indices of `rows` in the order given by `spec`.
///
/// The sort is stable in both directions: rows with equal keys keep their
/// insertion order.
pub fn sorted_indices<R: TableRow>(rows: &[R], spec: &SortSpec) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let Some(column) = spec.column.as_deref() else {
        return indices;
    };
    if spec.direction == SortDirection::None {
        return indices;
    }

    let keys: Vec<_> = rows.iter().map(|row| row.cell(column)).collect();
    let descending = spec.direction == SortDirection::Descending;
    indices.sort_by(|&a, &b| {
        let cmp = keys[a].cmp(&keys[b]);
        if descending { cmp.reverse() } else { cmp }
    });
    indices
}
