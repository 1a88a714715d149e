//! Generic sortable, paginated tables.
//!
//! Rows implement [`TableRow`] to expose a [`CellValue`] per column key.
//! [`SortedPaginatedView`] owns the rows plus the sort and page state and
//! hands out one [`PageView`] at a time; [`project`] is the stateless
//! projection it is built on.
//!
//! # Example
//!
//! ```
//! use horizon_loom::table::{CellValue, Column, SortedPaginatedView, TableRow};
//!
//! struct User { name: String, age: i64 }
//!
//! impl TableRow for User {
//!     fn cell(&self, key: &str) -> CellValue {
//!         match key {
//!             "name" => self.name.as_str().into(),
//!             "age" => self.age.into(),
//!             _ => CellValue::Empty,
//!         }
//!     }
//! }
//!
//! let mut table = SortedPaginatedView::new(vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("age", "Age").sortable(),
//! ])
//! .with_rows(vec![
//!     User { name: "Bo".into(), age: 41 },
//!     User { name: "Al".into(), age: 29 },
//! ]);
//!
//! table.click_header("age");
//! let names: Vec<_> = table.view().rows.iter().map(|u| u.name.clone()).collect();
//! assert_eq!(names, ["Al", "Bo"]);
//! ```

use std::collections::{BTreeMap, HashMap};

mod cell;
mod sort;
mod view;

pub use cell::CellValue;
pub use sort::{SortDirection, SortSpec, sorted_indices};
pub use view::{
    Alignment, Column, DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE, PageView, SortedPaginatedView,
    project, total_pages,
};

/// A row that can be shown in a table.
pub trait TableRow {
    /// The value of the cell in column `key`; [`CellValue::Empty`] if the
    /// row has no such column.
    fn cell(&self, key: &str) -> CellValue;
}

impl TableRow for BTreeMap<String, CellValue> {
    fn cell(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl TableRow for HashMap<String, CellValue> {
    fn cell(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}
