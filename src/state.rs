//! The table state store: sorting, visibility, filters, pagination.

use std::collections::HashMap;

use log::{debug, warn};

use crate::filter::FilterState;
use crate::page::PaginationState;
use crate::sort::{SortDirection, SortState};

/// Who owns sort, filter, and pagination for a table instance.
///
/// Fixed for the lifetime of the instance; switching modes mid-life is
/// unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The engine sorts, filters, and paginates supplied rows in memory.
    Client,
    /// The host owns sorting, filtering, and pagination; the engine forwards
    /// intents via callbacks and assembles the view from the supplied page.
    Server,
}

/// Internal pagination ownership.
///
/// Only client mode holds page state, which makes "the engine slices pages in
/// server mode" unrepresentable rather than merely forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageState {
    Client(PaginationState),
    Server,
}

/// State for one table instance, mutated only through its transition methods.
///
/// Every setter is synchronous, total for well-formed column ids, and reports
/// whether the state actually changed so callers can skip spurious re-renders
/// and callback firings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    mode: Mode,
    sorting: SortState,
    visibility: HashMap<String, bool>,
    filters: FilterState,
    pages: PageState,
}

impl TableState {
    pub(crate) fn new(mode: Mode, default_page_size: usize) -> Self {
        let pages = match mode {
            Mode::Client => PageState::Client(PaginationState::new(default_page_size)),
            Mode::Server => PageState::Server,
        };
        Self {
            mode,
            sorting: SortState::default(),
            visibility: HashMap::new(),
            filters: FilterState::default(),
            pages,
        }
    }

    /// The instance's operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current sort state.
    pub fn sorting(&self) -> &SortState {
        &self.sorting
    }

    /// The current filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Client-mode pagination state. `None` in server mode.
    pub fn pagination(&self) -> Option<&PaginationState> {
        match &self.pages {
            PageState::Client(p) => Some(p),
            PageState::Server => None,
        }
    }

    /// Whether a column is currently visible. Unknown ids default visible.
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.visibility.get(column_id).copied().unwrap_or(true)
    }

    /// Advance the sort cycle for a column, clearing any other column's sort.
    ///
    /// Returns the column's new direction (`None` when a client-mode cycle
    /// returns to unsorted).
    pub(crate) fn toggle_sort(&mut self, column_id: &str) -> Option<SortDirection> {
        let next = self.sorting.toggle(self.mode, column_id);
        debug!("sort toggled: {column_id} -> {next:?}");
        next
    }

    /// Set a column's visibility. Returns whether the state changed.
    pub(crate) fn set_column_visible(&mut self, column_id: &str, visible: bool) -> bool {
        if self.is_visible(column_id) == visible {
            return false;
        }
        self.visibility.insert(column_id.to_string(), visible);
        debug!("column {column_id} visibility -> {visible}");
        true
    }

    /// Set the global filter. Returns whether the state changed.
    pub(crate) fn set_global_filter(&mut self, value: &str) -> bool {
        self.filters.set_global(value)
    }

    /// Set a per-column filter. Returns whether the state changed.
    pub(crate) fn set_column_filter(&mut self, column_id: &str, value: &str) -> bool {
        self.filters.set_column(column_id, value)
    }

    /// Set the page index (client mode only). Returns whether it changed.
    ///
    /// A no-op in server mode, where the host owns the page position.
    pub(crate) fn set_page_index(&mut self, index: usize) -> bool {
        match &mut self.pages {
            PageState::Client(p) => p.set_page_index(index),
            PageState::Server => false,
        }
    }

    /// Set the page size (client mode only), resetting to the first page.
    ///
    /// Zero is rejected with the previous value retained.
    /// Returns whether the state changed.
    pub(crate) fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 {
            warn!("rejected page size 0; keeping previous value");
            return false;
        }
        match &mut self.pages {
            PageState::Client(p) => p.set_page_size(size),
            PageState::Server => false,
        }
    }

    /// Clamp the client page index against the filtered row count.
    /// Returns whether the index moved.
    pub(crate) fn clamp_page(&mut self, total_rows: usize) -> bool {
        match &mut self.pages {
            PageState::Client(p) => p.clamp(total_rows),
            PageState::Server => false,
        }
    }
}
