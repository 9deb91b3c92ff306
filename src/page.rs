//! Pagination state, server page metadata, and row numbering.

use serde::{Deserialize, Serialize};

/// Initial page size when the table config does not override it.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Client-mode pagination state, owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
}

impl PaginationState {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Current page index (0-based).
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set the page index. Returns whether the state changed.
    ///
    /// Out-of-range indices are accepted here and clamped against the row
    /// count when the view model is derived.
    pub(crate) fn set_page_index(&mut self, index: usize) -> bool {
        if self.page_index == index {
            return false;
        }
        self.page_index = index;
        true
    }

    /// Set the page size, resetting the index to the first page so the
    /// current position never lands beyond the new last page.
    ///
    /// A size of zero is rejected and the previous value retained.
    /// Returns whether the state changed.
    pub(crate) fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 || self.page_size == size {
            return false;
        }
        self.page_size = size;
        self.page_index = 0;
        true
    }

    /// Clamp the page index to the last page for `total_rows` rows.
    /// Returns whether the index moved.
    pub(crate) fn clamp(&mut self, total_rows: usize) -> bool {
        let last = page_count(total_rows, self.page_size).saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
            return true;
        }
        false
    }

    /// Row number shown for the row at `index_in_page` on the current page.
    pub fn row_number(&self, index_in_page: usize) -> usize {
        self.page_index * self.page_size + index_in_page + 1
    }
}

/// Number of pages needed for `total_rows` rows. Never zero: an empty row
/// set still has one (empty) page.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_rows.div_ceil(page_size).max(1)
}

/// Server-mode pagination metadata, supplied by the host alongside each page
/// of rows. The engine uses it verbatim for the summary and row numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page (1-based).
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total rows across all pages.
    pub total_items: usize,
    /// Total page count.
    pub total_pages: usize,
}

impl PageMeta {
    /// Row number shown for the row at `index_in_page` on this page.
    ///
    /// Independent of how many rows the host actually returned, so a short
    /// last page still numbers from the page boundary.
    pub fn row_number(&self, index_in_page: usize) -> usize {
        self.current_page.saturating_sub(1) * self.page_size + index_in_page + 1
    }

    /// Fallback meta describing all supplied rows as a single page.
    pub(crate) fn single_page(total_rows: usize) -> Self {
        Self {
            current_page: 1,
            page_size: total_rows.max(1),
            total_items: total_rows,
            total_pages: 1,
        }
    }
}

/// Derived pagination summary handed to the host in the view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// Current page (1-based, for display).
    pub page: usize,
    /// Total page count.
    pub page_count: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total rows across all pages (after filtering, in client mode).
    pub total_items: usize,
    /// Row number of the first row on this page, if the page has rows.
    pub first_row: Option<usize>,
    /// Row number of the last row on this page, if the page has rows.
    pub last_row: Option<usize>,
    /// Whether a previous page exists.
    pub can_prev: bool,
    /// Whether a next page exists.
    pub can_next: bool,
    /// Host-supplied loading flag, passed through untouched. Always `false`
    /// in client mode.
    pub fetching: bool,
    /// Page size choices surfaced to the host's selector UI.
    pub page_size_options: Vec<usize>,
}
