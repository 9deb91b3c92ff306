pub mod column;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod page;
pub mod sort;
pub mod state;
pub mod table;
pub mod value;

pub mod prelude {
    pub use crate::column::{ACTIONS_COLUMN, Column, ROW_NUMBER_COLUMN};
    pub use crate::debounce::Debouncer;
    pub use crate::error::ConfigError;
    pub use crate::page::{PageMeta, PageSummary, PaginationState};
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::state::{Mode, TableState};
    pub use crate::table::{
        BodyRow, Epoch, ExternalPage, HeaderCell, PageChange, Table, TableConfig, ViewModel,
    };
    pub use crate::value::CellValue;
}
