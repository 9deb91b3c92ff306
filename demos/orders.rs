//! Orders demo - drives one table engine in each mode.
//!
//! The client-mode table sorts, filters, and paginates 25 in-memory orders.
//! The server-mode table forwards every intent to a simulated API which
//! applies sort and pagination itself and returns one page at a time, the
//! way a GraphQL-backed admin screen would.

use std::time::Duration;

use log::LevelFilter;
use simplelog::{Config, SimpleLogger};

use gridstate::prelude::*;

#[derive(Debug, Clone)]
struct Order {
    id: u32,
    customer: String,
    total: f64,
}

fn dataset() -> Vec<Order> {
    let names = ["Contoso", "Fabrikam", "Northwind", "Adatum", "Proseware"];
    (1..=25u32)
        .map(|id| Order {
            id,
            customer: format!("{} #{id}", names[(id as usize - 1) % names.len()]),
            total: f64::from((id * 17) % 100) + 0.5,
        })
        .collect()
}

fn columns() -> Vec<Column<Order>> {
    vec![
        Column::new("id", "ID").accessor(|o: &Order| o.id.into()).width(6),
        Column::new("customer", "Customer")
            .accessor(|o: &Order| o.customer.as_str().into())
            .width(16),
        Column::new("total", "Total").accessor(|o: &Order| o.total.into()).width(8),
    ]
}

fn print_view(vm: &ViewModel<'_, Order>) {
    let header: Vec<String> = vm
        .headers
        .iter()
        .map(|h| {
            let indicator = match h.sort {
                Some(SortDirection::Asc) => " ^",
                Some(SortDirection::Desc) => " v",
                None => "",
            };
            format!("{}{indicator}", h.label)
        })
        .collect();
    println!("  {}", header.join(" | "));
    for row in &vm.body {
        let cells: Vec<String> = row.cells.iter().map(ToString::to_string).collect();
        println!("  {}", cells.join(" | "));
    }
    let s = &vm.summary;
    println!(
        "  page {}/{} ({} items{}){}",
        s.page,
        s.page_count,
        s.total_items,
        s.first_row
            .zip(s.last_row)
            .map(|(a, b)| format!(", rows {a}-{b}"))
            .unwrap_or_default(),
        if s.fetching { " [fetching]" } else { "" },
    );
}

/// Simulated API: sorts and paginates the dataset server-side.
fn fetch_page(
    sort: Option<(String, SortDirection)>,
    page: usize,
    page_size: usize,
) -> (Vec<Order>, PageMeta) {
    let mut rows = dataset();
    if let Some((column, direction)) = sort {
        rows.sort_by(|a, b| {
            let ordering = match column.as_str() {
                "customer" => a.customer.cmp(&b.customer),
                "total" => a.total.partial_cmp(&b.total).unwrap_or(std::cmp::Ordering::Equal),
                _ => a.id.cmp(&b.id),
            };
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
    let total_items = rows.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let start = (page - 1) * page_size;
    let rows = rows.into_iter().skip(start).take(page_size).collect();
    let meta = PageMeta {
        current_page: page,
        page_size,
        total_items,
        total_pages,
    };
    (rows, meta)
}

async fn client_demo() {
    println!("== client mode ==");
    let config = TableConfig {
        show_row_number: true,
        debounce: Duration::from_millis(100),
        ..TableConfig::default()
    };
    let table = Table::new(columns(), Mode::Client, config).expect("valid columns");
    let rows = dataset();

    print_view(&table.view_model(&rows, None));

    println!("-- next page --");
    table.page_change(PageChange::Next);
    print_view(&table.view_model(&rows, None));

    println!("-- sort by total --");
    table.sort("total");
    print_view(&table.view_model(&rows, None));

    println!("-- search \"contoso\" --");
    table.search_input("contoso");
    while table.search_pending() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    print_view(&table.view_model(&rows, None));
}

#[derive(Debug, Clone)]
enum Intent {
    Sort(Epoch, String, SortDirection),
    Page(Epoch, usize),
}

async fn server_demo() {
    println!("== server mode ==");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let sort_tx = tx.clone();
    let page_tx = tx;
    let table = Table::new(columns(), Mode::Server, TableConfig::default())
        .expect("valid columns")
        .with_on_sort(move |epoch, column, direction| {
            let _ = sort_tx.send(Intent::Sort(epoch, column.to_string(), direction));
        })
        .with_on_page(move |epoch, page| {
            let _ = page_tx.send(Intent::Page(epoch, page));
        });

    // Host-side fetch state: the current query plus the latest issued epoch,
    // used to discard stale responses.
    let mut latest_epoch = 0u64;
    let mut sort: Option<(String, SortDirection)> = None;
    let mut page = 1usize;

    let (rows, meta) = fetch_page(sort.clone(), page, 10);
    print_view(&table.view_model(&rows, Some(ExternalPage { meta: &meta, fetching: false })));

    println!("-- sort by customer, then next page --");
    table.sort("customer");
    table.page_change(PageChange::Next);

    while let Ok(intent) = rx.try_recv() {
        let epoch = match &intent {
            Intent::Sort(e, ..) | Intent::Page(e, _) => *e,
        };
        if epoch < latest_epoch {
            log::info!("discarding stale intent at epoch {epoch}");
            continue;
        }
        latest_epoch = epoch;
        match intent {
            Intent::Sort(_, column, direction) => sort = Some((column, direction)),
            Intent::Page(_, requested) => page = requested,
        }
        let (rows, meta) = fetch_page(sort.clone(), page, 10);
        print_view(&table.view_model(&rows, Some(ExternalPage { meta: &meta, fetching: false })));
    }
}

#[tokio::main]
async fn main() {
    let _ = SimpleLogger::init(LevelFilter::Info, Config::default());
    client_demo().await;
    server_demo().await;
}
