//! View-model derivation: the output the host renders.

use log::warn;

use crate::column::ROW_NUMBER_COLUMN;
use crate::filter::cell_matches;
use crate::page::{PageMeta, PageSummary, page_count};
use crate::sort::SortDirection;
use crate::state::Mode;
use crate::value::CellValue;

use super::{Table, TableInner};

/// Header metadata for one visible column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column id.
    pub id: String,
    /// Header label, opaque to the engine.
    pub label: String,
    /// Whether the column responds to sort intents.
    pub sortable: bool,
    /// Sort indicator: the column's direction if it is the active sort.
    pub sort: Option<SortDirection>,
    /// Opaque width hint from the column definition.
    pub width: Option<u16>,
}

/// One row of the current page, with cells extracted for visible columns.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow<'a, T> {
    /// The underlying row, for host-rendered content the accessors do not
    /// cover (action menus, badges).
    pub row: &'a T,
    /// Sequential row number across pages (1-based).
    pub number: usize,
    /// One cell per visible column, in column order. The synthetic
    /// row-number column materializes as `CellValue::Int(number)`.
    pub cells: Vec<CellValue>,
}

/// The derived view for the current state: visible headers, the current
/// page's rows, and a pagination summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a, T> {
    pub headers: Vec<HeaderCell>,
    pub body: Vec<BodyRow<'a, T>>,
    pub summary: PageSummary,
}

impl<T> ViewModel<'_, T> {
    fn empty() -> Self {
        Self {
            headers: Vec::new(),
            body: Vec::new(),
            summary: PageSummary {
                page: 1,
                page_count: 1,
                page_size: 0,
                total_items: 0,
                first_row: None,
                last_row: None,
                can_prev: false,
                can_next: false,
                fetching: false,
                page_size_options: Vec::new(),
            },
        }
    }
}

/// Server-mode page context supplied by the host alongside the rows.
#[derive(Debug, Clone, Copy)]
pub struct ExternalPage<'a> {
    /// Pagination metadata, used verbatim for the summary and row numbers.
    pub meta: &'a PageMeta,
    /// The host's loading flag, passed through to the summary untouched.
    pub fetching: bool,
}

impl<T: 'static> Table<T> {
    /// Derive the view model for the supplied rows.
    ///
    /// Client mode filters, sorts, and slices `rows` internally; the
    /// `external` argument is ignored. Server mode assumes `rows` is already
    /// the correct page (fewer rows than the page size is a valid last page)
    /// and uses `external` metadata verbatim; omitting it is host misuse,
    /// warned once, with the rows treated as a single page.
    pub fn view_model<'a>(
        &self,
        rows: &'a [T],
        external: Option<ExternalPage<'_>>,
    ) -> ViewModel<'a, T> {
        let Ok(mut guard) = self.inner.write() else {
            return ViewModel::empty();
        };
        match guard.state.mode() {
            Mode::Client => client_view(&mut guard, rows),
            Mode::Server => server_view(&mut guard, rows, external),
        }
    }
}

fn client_view<'a, T>(inner: &mut TableInner<T>, rows: &'a [T]) -> ViewModel<'a, T> {
    let mut indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_passes_filters(inner, row))
        .map(|(i, _)| i)
        .collect();

    let active = inner
        .state
        .sorting()
        .active()
        .map(|(id, dir)| (id.to_string(), dir));
    if let Some((column_id, direction)) = active
        && let Some(column) = inner.columns.iter().find(|c| c.id() == column_id)
        && column.has_accessor()
    {
        indices.sort_by(|&a, &b| {
            let ordering = column.value_of(&rows[a]).compare(&column.value_of(&rows[b]));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let total = indices.len();
    inner.state.clamp_page(total);
    let Some(pagination) = inner.state.pagination().copied() else {
        // Client mode always carries pagination state.
        return ViewModel::empty();
    };

    let start = (pagination.page_index() * pagination.page_size()).min(total);
    let end = (start + pagination.page_size()).min(total);
    let page = &indices[start..end];

    let body = page
        .iter()
        .enumerate()
        .map(|(i, &row_index)| body_row(inner, &rows[row_index], pagination.row_number(i)))
        .collect();

    let pages = page_count(total, pagination.page_size());
    let summary = PageSummary {
        page: pagination.page_index() + 1,
        page_count: pages,
        page_size: pagination.page_size(),
        total_items: total,
        first_row: (!page.is_empty()).then(|| pagination.row_number(0)),
        last_row: (!page.is_empty()).then(|| pagination.row_number(page.len() - 1)),
        can_prev: pagination.page_index() > 0,
        can_next: pagination.page_index() + 1 < pages,
        fetching: false,
        page_size_options: inner.page_size_options.clone(),
    };

    ViewModel {
        headers: headers(inner),
        body,
        summary,
    }
}

fn server_view<'a, T>(
    inner: &mut TableInner<T>,
    rows: &'a [T],
    external: Option<ExternalPage<'_>>,
) -> ViewModel<'a, T> {
    let fetching = external.is_some_and(|e| e.fetching);
    let meta = match external {
        Some(e) => *e.meta,
        None => {
            if !inner.warned_missing_meta {
                warn!("server-mode view without page metadata; treating rows as a single page");
                inner.warned_missing_meta = true;
            }
            PageMeta::single_page(rows.len())
        }
    };
    inner.last_meta = Some(meta);

    let body = rows
        .iter()
        .enumerate()
        .map(|(i, row)| body_row(inner, row, meta.row_number(i)))
        .collect();

    let summary = PageSummary {
        page: meta.current_page,
        page_count: meta.total_pages,
        page_size: meta.page_size,
        total_items: meta.total_items,
        first_row: (!rows.is_empty()).then(|| meta.row_number(0)),
        last_row: (!rows.is_empty()).then(|| meta.row_number(rows.len() - 1)),
        can_prev: meta.current_page > 1,
        can_next: meta.current_page < meta.total_pages,
        fetching,
        page_size_options: inner.page_size_options.clone(),
    };

    ViewModel {
        headers: headers(inner),
        body,
        summary,
    }
}

/// Global filter matches any column with an accessor; every per-column
/// filter must match its own column. Hidden columns still participate:
/// visibility is a display concern, not a data concern.
fn row_passes_filters<T>(inner: &TableInner<T>, row: &T) -> bool {
    let global = inner.state.filters().global();
    if !global.is_empty() {
        let any = inner
            .columns
            .iter()
            .filter(|c| c.has_accessor())
            .any(|c| cell_matches(&c.value_of(row), global));
        if !any {
            return false;
        }
    }
    for (column_id, value) in inner.state.filters().columns() {
        if let Some(column) = inner.columns.iter().find(|c| c.id() == column_id)
            && !cell_matches(&column.value_of(row), value)
        {
            return false;
        }
    }
    true
}

fn headers<T>(inner: &TableInner<T>) -> Vec<HeaderCell> {
    inner
        .columns
        .iter()
        .filter(|c| inner.state.is_visible(c.id()))
        .map(|c| HeaderCell {
            id: c.id().to_string(),
            label: c.header().to_string(),
            sortable: c.is_sortable(),
            sort: inner.state.sorting().direction_of(c.id()),
            width: c.width_hint(),
        })
        .collect()
}

fn body_row<'a, T>(inner: &TableInner<T>, row: &'a T, number: usize) -> BodyRow<'a, T> {
    let cells = inner
        .columns
        .iter()
        .filter(|c| inner.state.is_visible(c.id()))
        .map(|c| {
            if c.id() == ROW_NUMBER_COLUMN {
                CellValue::Int(number as i64)
            } else {
                c.value_of(row)
            }
        })
        .collect();
    BodyRow { row, number, cells }
}
