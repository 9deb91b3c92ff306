//! Column definitions for the table engine.

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// Reserved id of the synthetic row-number column.
pub const ROW_NUMBER_COLUMN: &str = "rowNumber";

/// Reserved id conventionally used for per-row action menus.
pub const ACTIONS_COLUMN: &str = "actions";

/// Returns `true` for ids the engine reserves.
///
/// Reserved columns are never sortable and never hidden.
pub fn is_reserved(id: &str) -> bool {
    id == ROW_NUMBER_COLUMN || id == ACTIONS_COLUMN
}

type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Column configuration.
///
/// Columns define the structure of a table: a unique id, a header label
/// (opaque to the engine), an accessor projecting a cell value out of a row,
/// and sortability/hideability flags. The optional width is an opaque layout
/// hint passed through to the host untouched.
///
/// # Examples
///
/// ```
/// use gridstate::column::Column;
///
/// struct Order { id: u32, customer: String }
///
/// let columns = vec![
///     Column::new("id", "ID").accessor(|o: &Order| o.id.into()).width(8),
///     Column::new("customer", "Customer").accessor(|o: &Order| o.customer.as_str().into()),
///     Column::new("actions", "").hideable(false),
/// ];
/// ```
pub struct Column<T> {
    id: String,
    header: String,
    accessor: Option<Accessor<T>>,
    sortable: bool,
    hideable: bool,
    width: Option<u16>,
}

impl<T> Column<T> {
    /// Create a new column.
    ///
    /// Columns default to sortable and hideable, except reserved ids
    /// ([`ROW_NUMBER_COLUMN`], [`ACTIONS_COLUMN`]) which are neither.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        let reserved = is_reserved(&id);
        Self {
            id,
            header: header.into(),
            accessor: None,
            sortable: !reserved,
            hideable: !reserved,
            width: None,
        }
    }

    /// Internal constructor for the injected row-number column.
    pub(crate) fn row_number() -> Self {
        Self::new(ROW_NUMBER_COLUMN, "#")
    }

    /// Set the accessor extracting this column's cell value from a row.
    ///
    /// Columns without an accessor (typically action columns whose content
    /// the host renders itself) yield [`CellValue::Empty`].
    pub fn accessor(mut self, f: impl Fn(&T) -> CellValue + Send + Sync + 'static) -> Self {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Set whether the column is sortable. Ignored for reserved ids.
    pub fn sortable(mut self, sortable: bool) -> Self {
        if !is_reserved(&self.id) {
            self.sortable = sortable;
        }
        self
    }

    /// Set whether the column can be hidden. Ignored for reserved ids.
    pub fn hideable(mut self, hideable: bool) -> Self {
        if !is_reserved(&self.id) {
            self.hideable = hideable;
        }
        self
    }

    /// Set the opaque width hint.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// The column id, unique within a table instance.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Whether the column is sortable.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Whether the column can be hidden.
    pub fn is_hideable(&self) -> bool {
        self.hideable
    }

    /// The opaque width hint, if any.
    pub fn width_hint(&self) -> Option<u16> {
        self.width
    }

    /// Extract this column's cell value from a row.
    pub fn value_of(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(f) => f(row),
            None => CellValue::Empty,
        }
    }

    /// Whether the column has an accessor.
    pub(crate) fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            hideable: self.hideable,
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("width", &self.width)
            .field("has_accessor", &self.accessor.is_some())
            .finish()
    }
}
