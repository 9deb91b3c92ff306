//! The table engine: composes the state store, sort cycle, debouncer, and
//! row numbering behind one host-facing contract.

mod view;

pub use view::{BodyRow, ExternalPage, HeaderCell, ViewModel};

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::warn;

use crate::column::Column;
use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::error::ConfigError;
use crate::page::{DEFAULT_PAGE_SIZE, PageMeta};
use crate::sort::SortDirection;
use crate::state::{Mode, TableState};

/// Monotonically increasing token attached to every server-mode intent.
///
/// The host tags its fetches with the epoch it received and discards any
/// response carrying an epoch older than the latest one issued. The engine
/// itself holds no network state.
pub type Epoch = u64;

/// A relative page-change intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// Move to the previous page.
    Prev,
    /// Move to the next page.
    Next,
}

/// Configuration recognized at table construction.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Initial page size (client mode) or the default the host starts from
    /// (server mode).
    pub default_page_size: usize,
    /// Page size choices surfaced to the host's selector UI.
    pub page_size_options: Vec<usize>,
    /// Inject the synthetic row-number column as the first column.
    pub show_row_number: bool,
    /// Restrict search input to one column's filter. Absent: search matches
    /// any column (client) or is the host's concern (server).
    pub search_column: Option<String>,
    /// Quiet window for search debouncing.
    pub debounce: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            show_row_number: false,
            search_column: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

type SearchCallback = Arc<dyn Fn(Epoch, &str) + Send + Sync>;
type SortCallback = Arc<dyn Fn(Epoch, &str, SortDirection) + Send + Sync>;
type PageCallback = Arc<dyn Fn(Epoch, usize) + Send + Sync>;

/// Callbacks the engine invokes on the host in server mode.
///
/// Every slot is optional: an intent whose callback was never registered is
/// a silent no-op, since the host opted out of that capability. Callbacks
/// are invoked with no engine lock held, so a callback may safely call back
/// into the table.
#[derive(Default, Clone)]
struct HostCallbacks {
    on_search: Option<SearchCallback>,
    on_sort: Option<SortCallback>,
    /// Receives the requested page number (1-based).
    on_page: Option<PageCallback>,
    on_page_size: Option<PageCallback>,
}

struct TableInner<T> {
    columns: Vec<Column<T>>,
    state: TableState,
    search_column: Option<String>,
    page_size_options: Vec<usize>,
    callbacks: HostCallbacks,
    /// Last server-mode metadata seen, so relative page intents can resolve
    /// to an absolute page number.
    last_meta: Option<PageMeta>,
    /// Missing-meta misuse is reported once, not per frame.
    warned_missing_meta: bool,
}

/// A dual-mode table engine.
///
/// `Table<T>` owns sort / filter / visibility / pagination state for one
/// table instance and derives a [`ViewModel`] from host-supplied rows. In
/// client mode the supplied rows are filtered, sorted, and sliced in memory;
/// in server mode the rows are assumed to already be the correct page and
/// user intents are forwarded to the host via registered callbacks, each
/// tagged with an increasing [`Epoch`].
///
/// The handle is cheap to clone; clones share state. Rendering layers can
/// poll [`is_dirty`](Table::is_dirty) to know when to re-derive the view.
///
/// # Example
///
/// ```
/// use gridstate::prelude::*;
///
/// struct Order { id: u32, customer: String, total: f64 }
///
/// let columns = vec![
///     Column::new("id", "ID").accessor(|o: &Order| o.id.into()),
///     Column::new("customer", "Customer").accessor(|o: &Order| o.customer.as_str().into()),
///     Column::new("total", "Total").accessor(|o: &Order| o.total.into()),
/// ];
/// let table = Table::new(columns, Mode::Client, TableConfig::default()).unwrap();
///
/// let orders = vec![Order { id: 1, customer: "Contoso".into(), total: 9.5 }];
/// let vm = table.view_model(&orders, None);
/// assert_eq!(vm.body.len(), 1);
/// ```
pub struct Table<T> {
    inner: Arc<RwLock<TableInner<T>>>,
    dirty: Arc<AtomicBool>,
    debounce: Arc<Debouncer>,
    epoch: Arc<AtomicU64>,
    mode: Mode,
}

impl<T: 'static> Table<T> {
    /// Create a table instance.
    ///
    /// Validates the column model once, synchronously: duplicate column ids
    /// and an unknown `search_column` are configuration errors fatal to this
    /// instance. When `show_row_number` is set, the synthetic row-number
    /// column is injected first; it is never sortable and never hidden.
    pub fn new(
        columns: Vec<Column<T>>,
        mode: Mode,
        config: TableConfig,
    ) -> Result<Self, ConfigError> {
        let mut columns = columns;
        if config.show_row_number {
            columns.insert(0, Column::row_number());
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id().to_string()) {
                return Err(ConfigError::DuplicateColumn {
                    id: column.id().to_string(),
                });
            }
        }
        if let Some(search) = &config.search_column
            && !columns.iter().any(|c| c.id() == search)
        {
            return Err(ConfigError::UnknownSearchColumn { id: search.clone() });
        }

        let inner = TableInner {
            columns,
            state: TableState::new(mode, config.default_page_size),
            search_column: config.search_column,
            page_size_options: config.page_size_options,
            callbacks: HostCallbacks::default(),
            last_meta: None,
            warned_missing_meta: false,
        };
        Ok(Self {
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
            debounce: Arc::new(Debouncer::new(config.debounce)),
            epoch: Arc::new(AtomicU64::new(0)),
            mode,
        })
    }

    /// The instance's operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Register the host callback for debounced search input (server mode).
    pub fn with_on_search(self, f: impl Fn(Epoch, &str) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.callbacks.on_search = Some(Arc::new(f));
        }
        self
    }

    /// Register the host callback for sort changes (server mode).
    pub fn with_on_sort(
        self,
        f: impl Fn(Epoch, &str, SortDirection) + Send + Sync + 'static,
    ) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.callbacks.on_sort = Some(Arc::new(f));
        }
        self
    }

    /// Register the host callback for page changes (server mode).
    ///
    /// Receives the requested page number, 1-based.
    pub fn with_on_page(self, f: impl Fn(Epoch, usize) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.callbacks.on_page = Some(Arc::new(f));
        }
        self
    }

    /// Register the host callback for page size changes (server mode).
    pub fn with_on_page_size(self, f: impl Fn(Epoch, usize) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.callbacks.on_page_size = Some(Arc::new(f));
        }
        self
    }

    /// Toggle sorting for a column.
    ///
    /// Client mode cycles `None -> Asc -> Desc -> None`; server mode starts
    /// an unselected column at `Asc` and then toggles `Asc <-> Desc`, and
    /// additionally forwards `(epoch, column, direction)` to the host, which
    /// is responsible for refetching and re-supplying rows. Unknown or
    /// unsortable columns are logged no-ops.
    pub fn sort(&self, column_id: &str) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let sortable = guard
            .columns
            .iter()
            .any(|c| c.id() == column_id && c.is_sortable());
        if !sortable {
            warn!("sort intent on unknown or unsortable column: {column_id}");
            return;
        }

        let next = guard.state.toggle_sort(column_id);
        self.dirty.store(true, Ordering::SeqCst);

        let callback = (self.mode == Mode::Server)
            .then(|| guard.callbacks.on_sort.clone())
            .flatten();
        drop(guard);
        if let (Some(direction), Some(callback)) = (next, callback) {
            callback(self.next_epoch(), column_id, direction);
        }
    }

    /// Feed raw search input through the debouncer.
    ///
    /// On fire, client mode updates the global filter (or the configured
    /// search column's filter); server mode forwards the raw value to the
    /// host's search callback and leaves internal filters untouched.
    pub fn search_input(&self, raw: impl Into<String>) {
        let value = raw.into();
        let inner = Arc::clone(&self.inner);
        let dirty = Arc::clone(&self.dirty);
        match self.mode {
            Mode::Client => {
                self.debounce.schedule(value, move |v| {
                    let Ok(mut guard) = inner.write() else {
                        return;
                    };
                    let changed = match guard.search_column.clone() {
                        Some(column) => guard.state.set_column_filter(&column, &v),
                        None => guard.state.set_global_filter(&v),
                    };
                    if changed {
                        dirty.store(true, Ordering::SeqCst);
                    }
                });
            }
            Mode::Server => {
                let epoch = Arc::clone(&self.epoch);
                self.debounce.schedule(value, move |v| {
                    let callback = inner
                        .read()
                        .ok()
                        .and_then(|guard| guard.callbacks.on_search.clone());
                    if let Some(callback) = callback {
                        callback(epoch.fetch_add(1, Ordering::SeqCst) + 1, &v);
                    }
                });
            }
        }
    }

    /// Whether a search debounce is currently pending, for transient
    /// "searching…" indicators.
    pub fn search_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Move one page forward or back.
    ///
    /// Client mode mutates internal pagination (clamped against the row
    /// count when the view is derived). Server mode resolves the intent
    /// against the last supplied [`PageMeta`] and forwards the absolute page
    /// number to the host; already at a boundary, nothing is emitted.
    pub fn page_change(&self, change: PageChange) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        match self.mode {
            Mode::Client => {
                let Some(pagination) = guard.state.pagination() else {
                    return;
                };
                let index = pagination.page_index();
                let target = match change {
                    PageChange::Prev => index.saturating_sub(1),
                    PageChange::Next => index + 1,
                };
                if guard.state.set_page_index(target) {
                    self.dirty.store(true, Ordering::SeqCst);
                }
            }
            Mode::Server => {
                let Some(meta) = guard.last_meta else {
                    warn!("page change before any page metadata was supplied");
                    return;
                };
                let target = match change {
                    PageChange::Prev => meta.current_page.saturating_sub(1).max(1),
                    PageChange::Next => (meta.current_page + 1).min(meta.total_pages.max(1)),
                };
                let callback = guard.callbacks.on_page.clone();
                drop(guard);
                if target != meta.current_page
                    && let Some(callback) = callback
                {
                    callback(self.next_epoch(), target);
                }
            }
        }
    }

    /// Change the page size.
    ///
    /// Client mode resets to the first page so the position never lands
    /// beyond the new last page; server mode forwards the size to the host.
    /// Zero is rejected with the previous value retained.
    pub fn set_page_size(&self, size: usize) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        match self.mode {
            Mode::Client => {
                if guard.state.set_page_size(size) {
                    self.dirty.store(true, Ordering::SeqCst);
                }
            }
            Mode::Server => {
                if size == 0 {
                    warn!("rejected page size 0; keeping previous value");
                    return;
                }
                let callback = guard.callbacks.on_page_size.clone();
                drop(guard);
                if let Some(callback) = callback {
                    callback(self.next_epoch(), size);
                }
            }
        }
    }

    /// Show or hide a column.
    ///
    /// Mode-independent: only affects which columns appear in the derived
    /// view, never what data is fetched. Non-hideable and unknown columns
    /// are logged no-ops, and setting the current value changes nothing.
    pub fn set_column_visible(&self, column_id: &str, visible: bool) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let Some(column) = guard.columns.iter().find(|c| c.id() == column_id) else {
            warn!("visibility intent on unknown column: {column_id}");
            return;
        };
        if !visible && !column.is_hideable() {
            warn!("column {column_id} cannot be hidden");
            return;
        }
        if guard.state.set_column_visible(column_id, visible) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check if state changed since the last [`clear_dirty`](Table::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag after re-deriving the view.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Tear down the instance: cancels any pending debounce timer.
    ///
    /// Dropping the last handle does the same; no background work survives.
    pub fn dispose(&self) {
        self.debounce.cancel();
    }

    fn next_epoch(&self) -> Epoch {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("mode", &self.mode)
            .field("dirty", &self.dirty.load(Ordering::SeqCst))
            .field("epoch", &self.epoch.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            debounce: Arc::clone(&self.debounce),
            epoch: Arc::clone(&self.epoch),
            mode: self.mode,
        }
    }
}
