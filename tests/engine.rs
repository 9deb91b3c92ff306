use std::sync::{Arc, Mutex};

use gridstate::prelude::*;

#[derive(Debug, Clone)]
struct Order {
    id: u32,
    customer: &'static str,
    total: f64,
}

fn columns() -> Vec<Column<Order>> {
    vec![
        Column::new("id", "ID").accessor(|o: &Order| o.id.into()).width(6),
        Column::new("customer", "Customer").accessor(|o: &Order| o.customer.into()),
        Column::new("total", "Total").accessor(|o: &Order| o.total.into()),
        Column::new("actions", ""),
    ]
}

fn orders(count: usize) -> Vec<Order> {
    (1..=count as u32)
        .map(|id| Order {
            id,
            customer: ["Contoso", "Fabrikam", "Northwind"][(id as usize - 1) % 3],
            total: f64::from(id) * 10.0,
        })
        .collect()
}

fn numbers<T>(vm: &ViewModel<'_, T>) -> Vec<usize> {
    vm.body.iter().map(|r| r.number).collect()
}

#[test]
fn duplicate_column_id_is_a_config_error() {
    let mut cols = columns();
    cols.push(Column::new("id", "Duplicate"));
    let err = Table::new(cols, Mode::Client, TableConfig::default()).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateColumn { id: "id".into() });
}

#[test]
fn unknown_search_column_is_a_config_error() {
    let config = TableConfig {
        search_column: Some("nope".into()),
        ..TableConfig::default()
    };
    let err = Table::new(columns(), Mode::Client, config).unwrap_err();
    assert_eq!(err, ConfigError::UnknownSearchColumn { id: "nope".into() });
}

#[test]
fn table_handle_is_debuggable() {
    let table = Table::new(columns(), Mode::Server, TableConfig::default()).unwrap();
    let repr = format!("{table:?}");
    assert!(repr.contains("Server"));
}

#[test]
fn row_number_column_is_injected_first() {
    let config = TableConfig {
        show_row_number: true,
        ..TableConfig::default()
    };
    let table = Table::new(columns(), Mode::Client, config).unwrap();
    let rows = orders(3);
    let vm = table.view_model(&rows, None);

    assert_eq!(vm.headers[0].id, ROW_NUMBER_COLUMN);
    assert!(!vm.headers[0].sortable);
    assert_eq!(vm.body[0].cells[0], CellValue::Int(1));

    // Never hidden, even if the host tries.
    table.set_column_visible(ROW_NUMBER_COLUMN, false);
    let vm = table.view_model(&rows, None);
    assert_eq!(vm.headers[0].id, ROW_NUMBER_COLUMN);
}

#[test]
fn client_pages_through_25_rows() {
    let config = TableConfig {
        show_row_number: true,
        ..TableConfig::default()
    };
    let table = Table::new(columns(), Mode::Client, config).unwrap();
    let rows = orders(25);

    let vm = table.view_model(&rows, None);
    assert_eq!(numbers(&vm), (1..=10).collect::<Vec<_>>());
    assert_eq!(vm.summary.page, 1);
    assert!(!vm.summary.can_prev);
    assert!(vm.summary.can_next);

    table.page_change(PageChange::Next);
    let vm = table.view_model(&rows, None);
    assert_eq!(numbers(&vm), (11..=20).collect::<Vec<_>>());
    assert!(vm.summary.can_next);

    table.page_change(PageChange::Next);
    let vm = table.view_model(&rows, None);
    assert_eq!(numbers(&vm), (21..=25).collect::<Vec<_>>());
    assert_eq!(vm.summary.page, 3);
    assert_eq!(vm.summary.first_row, Some(21));
    assert_eq!(vm.summary.last_row, Some(25));
    assert!(!vm.summary.can_next);

    // Past the last page: clamped, never an error.
    table.page_change(PageChange::Next);
    let vm = table.view_model(&rows, None);
    assert_eq!(vm.summary.page, 3);
    assert_eq!(numbers(&vm), (21..=25).collect::<Vec<_>>());
}

#[test]
fn client_sort_cycles_through_three_states() {
    let table = Table::new(columns(), Mode::Client, TableConfig::default()).unwrap();
    let rows = vec![
        Order { id: 1, customer: "Northwind", total: 30.0 },
        Order { id: 2, customer: "Contoso", total: 10.0 },
        Order { id: 3, customer: "Fabrikam", total: 20.0 },
    ];

    let sort_of = |vm: &ViewModel<'_, Order>, id: &str| {
        vm.headers.iter().find(|h| h.id == id).and_then(|h| h.sort)
    };
    let ids = |vm: &ViewModel<'_, Order>| -> Vec<u32> { vm.body.iter().map(|r| r.row.id).collect() };

    table.sort("customer");
    let vm = table.view_model(&rows, None);
    assert_eq!(sort_of(&vm, "customer"), Some(SortDirection::Asc));
    assert_eq!(ids(&vm), vec![2, 3, 1]);

    table.sort("customer");
    let vm = table.view_model(&rows, None);
    assert_eq!(sort_of(&vm, "customer"), Some(SortDirection::Desc));
    assert_eq!(ids(&vm), vec![1, 3, 2]);

    table.sort("customer");
    let vm = table.view_model(&rows, None);
    assert_eq!(sort_of(&vm, "customer"), None);
    assert_eq!(ids(&vm), vec![1, 2, 3]);

    // At most one column sorted: a new column clears the previous one.
    table.sort("customer");
    table.sort("total");
    let vm = table.view_model(&rows, None);
    assert_eq!(sort_of(&vm, "customer"), None);
    assert_eq!(sort_of(&vm, "total"), Some(SortDirection::Asc));
    assert_eq!(ids(&vm), vec![2, 3, 1]);
}

#[test]
fn sorting_an_unsortable_column_is_a_no_op() {
    let table = Table::new(columns(), Mode::Client, TableConfig::default()).unwrap();
    table.clear_dirty();
    table.sort("actions");
    table.sort("missing");
    assert!(!table.is_dirty());
    let rows = orders(3);
    let vm = table.view_model(&rows, None);
    assert!(vm.headers.iter().all(|h| h.sort.is_none()));
}

#[test]
fn page_size_change_resets_to_first_page_and_zero_is_rejected() {
    let table = Table::new(columns(), Mode::Client, TableConfig::default()).unwrap();
    let rows = orders(25);

    table.page_change(PageChange::Next);
    let vm = table.view_model(&rows, None);
    assert_eq!(vm.summary.page, 2);

    table.set_page_size(25);
    let vm = table.view_model(&rows, None);
    assert_eq!(vm.summary.page, 1);
    assert_eq!(vm.summary.page_size, 25);
    assert_eq!(vm.body.len(), 25);

    table.set_page_size(0);
    let vm = table.view_model(&rows, None);
    assert_eq!(vm.summary.page_size, 25);
}

#[test]
fn hiding_a_column_affects_headers_and_cells_only() {
    let table = Table::new(columns(), Mode::Client, TableConfig::default()).unwrap();
    let rows = orders(3);

    let before = table.view_model(&rows, None).headers.len();
    table.set_column_visible("total", false);
    let vm = table.view_model(&rows, None);
    assert_eq!(vm.headers.len(), before - 1);
    assert!(vm.headers.iter().all(|h| h.id != "total"));
    assert_eq!(vm.body[0].cells.len(), before - 1);
    assert_eq!(vm.summary.total_items, 3);
}

#[test]
fn visibility_is_idempotent() {
    let table = Table::new(columns(), Mode::Client, TableConfig::default()).unwrap();
    table.clear_dirty();
    table.set_column_visible("total", true);
    assert!(!table.is_dirty());
    table.set_column_visible("total", false);
    assert!(table.is_dirty());
    table.clear_dirty();
    table.set_column_visible("total", false);
    assert!(!table.is_dirty());
}

#[test]
fn server_short_last_page_numbers_from_page_boundary() {
    let config = TableConfig {
        show_row_number: true,
        ..TableConfig::default()
    };
    let table = Table::new(columns(), Mode::Server, config).unwrap();
    let rows = orders(5);
    let meta = PageMeta {
        current_page: 3,
        page_size: 10,
        total_items: 25,
        total_pages: 3,
    };

    let vm = table.view_model(&rows, Some(ExternalPage { meta: &meta, fetching: true }));
    assert_eq!(numbers(&vm), vec![21, 22, 23, 24, 25]);
    assert_eq!(vm.summary.page, 3);
    assert_eq!(vm.summary.total_items, 25);
    assert!(vm.summary.can_prev);
    assert!(!vm.summary.can_next);
    assert!(vm.summary.fetching);
}

#[test]
fn server_sort_toggles_and_emits_with_increasing_epochs() {
    let emitted: Arc<Mutex<Vec<(Epoch, String, SortDirection)>>> = Arc::default();
    let sink = Arc::clone(&emitted);
    let table = Table::new(columns(), Mode::Server, TableConfig::default())
        .unwrap()
        .with_on_sort(move |epoch, column, direction| {
            sink.lock().unwrap().push((epoch, column.to_string(), direction));
        });

    table.sort("customer");
    table.sort("customer");
    table.sort("customer");
    table.sort("total");

    let emitted = emitted.lock().unwrap();
    let directions: Vec<_> = emitted.iter().map(|(_, c, d)| (c.as_str(), *d)).collect();
    assert_eq!(
        directions,
        vec![
            ("customer", SortDirection::Asc),
            ("customer", SortDirection::Desc),
            ("customer", SortDirection::Asc),
            ("total", SortDirection::Asc),
        ]
    );
    let epochs: Vec<Epoch> = emitted.iter().map(|(e, _, _)| *e).collect();
    assert!(epochs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn server_sort_indicator_tracks_without_internal_filtering() {
    let table = Table::new(columns(), Mode::Server, TableConfig::default()).unwrap();
    let rows = orders(3);
    let meta = PageMeta {
        current_page: 1,
        page_size: 10,
        total_items: 3,
        total_pages: 1,
    };

    table.sort("total");
    let vm = table.view_model(&rows, Some(ExternalPage { meta: &meta, fetching: false }));
    let header = vm.headers.iter().find(|h| h.id == "total").unwrap();
    assert_eq!(header.sort, Some(SortDirection::Asc));
    // Rows come back in host order: the engine never re-sorts a server page.
    let ids: Vec<u32> = vm.body.iter().map(|r| r.row.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn server_page_change_resolves_against_last_meta() {
    let emitted: Arc<Mutex<Vec<(Epoch, usize)>>> = Arc::default();
    let sink = Arc::clone(&emitted);
    let table = Table::new(columns(), Mode::Server, TableConfig::default())
        .unwrap()
        .with_on_page(move |epoch, page| sink.lock().unwrap().push((epoch, page)));

    // Before any metadata, a page intent has nothing to resolve against.
    table.page_change(PageChange::Next);
    assert!(emitted.lock().unwrap().is_empty());

    let rows = orders(10);
    let meta = PageMeta {
        current_page: 1,
        page_size: 10,
        total_items: 25,
        total_pages: 3,
    };
    table.view_model(&rows, Some(ExternalPage { meta: &meta, fetching: false }));

    table.page_change(PageChange::Prev); // already at page 1
    table.page_change(PageChange::Next);
    let pages: Vec<usize> = emitted.lock().unwrap().iter().map(|(_, p)| *p).collect();
    assert_eq!(pages, vec![2]);

    let meta = PageMeta { current_page: 3, ..meta };
    table.view_model(&orders(5), Some(ExternalPage { meta: &meta, fetching: false }));
    table.page_change(PageChange::Next); // already at the last page
    let pages: Vec<usize> = emitted.lock().unwrap().iter().map(|(_, p)| *p).collect();
    assert_eq!(pages, vec![2]);
}

#[test]
fn server_page_size_forwards_and_rejects_zero() {
    let emitted: Arc<Mutex<Vec<usize>>> = Arc::default();
    let sink = Arc::clone(&emitted);
    let table = Table::new(columns(), Mode::Server, TableConfig::default())
        .unwrap()
        .with_on_page_size(move |_, size| sink.lock().unwrap().push(size));

    table.set_page_size(50);
    table.set_page_size(0);
    assert_eq!(*emitted.lock().unwrap(), vec![50]);
}

#[test]
fn unregistered_callbacks_are_silent_no_ops() {
    let table = Table::new(columns(), Mode::Server, TableConfig::default()).unwrap();
    let rows = orders(10);
    let meta = PageMeta {
        current_page: 1,
        page_size: 10,
        total_items: 25,
        total_pages: 3,
    };
    table.view_model(&rows, Some(ExternalPage { meta: &meta, fetching: false }));

    // None of these panic; the host opted out of the capabilities.
    table.sort("customer");
    table.page_change(PageChange::Next);
    table.set_page_size(25);
}
