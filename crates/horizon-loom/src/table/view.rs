//! Sorted and paginated projection of table rows.

use std::ops::RangeInclusive;

use horizon_loom_core::Signal;
use horizon_loom_core::logging::targets;

use super::sort::{SortSpec, sorted_indices};
use super::TableRow;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Message shown instead of rows when there is no data.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub align: Alignment,
    /// Width hint passed through to the host, e.g. `"120px"`.
    pub width: Option<String>,
}

impl Column {
    /// Create a non-sortable, left-aligned column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            align: Alignment::Left,
            width: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }
}

/// Number of pages for `count` rows; always at least 1.
///
/// A page size of 0 is treated as 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// One page of rows.
#[derive(Debug)]
pub struct PageView<'a, R> {
    /// Rows on this page, in display order.
    pub rows: Vec<&'a R>,
    /// Insertion index of each row on this page.
    pub indices: Vec<usize>,
    /// The 1-based page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub page_size: usize,
}

impl<R> PageView<'_, R> {
    /// Whether the table should show its empty-state message.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// "Showing X to Y of Z results", only when there is more than one page.
    pub fn summary(&self) -> Option<String> {
        if self.total_pages <= 1 {
            return None;
        }
        let start = (self.page - 1) * self.page_size + 1;
        let end = (self.page * self.page_size).min(self.total_rows);
        Some(format!(
            "Showing {start} to {end} of {} results",
            self.total_rows
        ))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page buttons to show.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }
}

/// Sort `data` by `spec` and return page `page` (1-based, clamped).
///
/// Deterministic for fixed inputs.
pub fn project<'a, R: TableRow>(
    data: &'a [R],
    spec: &SortSpec,
    page: usize,
    page_size: usize,
) -> PageView<'a, R> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(data.len(), page_size);
    let page = page.clamp(1, total_pages);

    let indices: Vec<usize> = sorted_indices(data, spec)
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    let rows = indices.iter().map(|&i| &data[i]).collect();

    PageView {
        rows,
        indices,
        page,
        total_pages,
        total_rows: data.len(),
        page_size,
    }
}

/// A table's rows together with its sort and page state.
pub struct SortedPaginatedView<R> {
    columns: Vec<Column>,
    rows: Vec<R>,
    sort: SortSpec,
    page: usize,
    page_size: usize,
    empty_message: String,
    sort_changed: Signal<SortSpec>,
    page_changed: Signal<usize>,
    row_activated: Signal<usize>,
}

impl<R: TableRow> SortedPaginatedView<R> {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            sort: SortSpec::unsorted(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            sort_changed: Signal::new(),
            page_changed: Signal::new(),
            row_activated: Signal::new(),
        }
    }

    /// Set rows per page (0 is treated as 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.set_rows(rows);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.rows.len(), self.page_size)
    }

    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    /// Signal emitted when the sort spec changes.
    pub fn sort_changed(&self) -> &Signal<SortSpec> {
        &self.sort_changed
    }

    /// Signal emitted with the new 1-based page.
    pub fn page_changed(&self) -> &Signal<usize> {
        &self.page_changed
    }

    /// Signal emitted with the insertion index of an activated row.
    pub fn row_activated(&self) -> &Signal<usize> {
        &self.row_activated
    }

    /// Replace the rows, clamping the current page into range.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.clamp_page();
    }

    /// Change rows per page, clamping the current page into range.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp_page();
    }

    /// Handle a header click.
    ///
    /// Returns `false` for unknown or non-sortable columns. Sorting resets
    /// the table to page 1.
    pub fn click_header(&mut self, key: &str) -> bool {
        if !self.columns.iter().any(|c| c.key == key && c.sortable) {
            return false;
        }
        self.sort.click(key);
        tracing::debug!(
            target: targets::TABLE,
            column = key,
            direction = ?self.sort.direction,
            "sort changed"
        );
        self.sort_changed.emit(self.sort.clone());
        self.go_to_page(1);
        true
    }

    /// Replace the sort spec directly.
    pub fn set_sort(&mut self, spec: SortSpec) {
        if self.sort != spec {
            self.sort = spec;
            self.sort_changed.emit(self.sort.clone());
            self.go_to_page(1);
        }
    }

    /// Go to a 1-based page, clamped into range. Returns whether it changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let page = page.clamp(1, self.total_pages());
        if page == self.page {
            return false;
        }
        self.page = page;
        self.page_changed.emit(page);
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// The rows on the current page.
    pub fn view(&self) -> PageView<'_, R> {
        project(&self.rows, &self.sort, self.page, self.page_size)
    }

    /// Activate the row at `position` on the current page.
    pub fn activate_row(&self, position: usize) -> Option<&R> {
        let view = self.view();
        let index = *view.indices.get(position)?;
        self.row_activated.emit(index);
        self.rows.get(index)
    }

    fn clamp_page(&mut self) {
        let clamped = self.page.clamp(1, self.total_pages());
        if clamped != self.page {
            self.page = clamped;
            self.page_changed.emit(clamped);
        }
    }
}

impl<R> std::fmt::Debug for SortedPaginatedView<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedPaginatedView")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .finish()
    }
}
