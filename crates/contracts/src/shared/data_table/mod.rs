//! Headless data table: column-driven filters, sort, pagination, column
//! layout and selection, with filter state persisted per table key.
//!
//! Rendering is left to the presentation layer (see the frontend crate);
//! everything here is plain data plus callbacks.

pub mod column;
pub mod config;
pub mod error;
pub mod layout;
pub mod operator;
pub mod persistence;
pub mod pipeline;
pub mod query;
pub mod row;
pub mod state;
pub mod table;
pub mod value;

pub use column::{ColumnDef, ColumnType, PinSide, SelectOption};
pub use config::DataTableConfig;
pub use error::{DataTableError, Result};
pub use operator::FilterOperator;
pub use persistence::{InMemoryStore, KeyValueStore, PersistedFilters, DEFAULT_NAMESPACE};
pub use row::{RowId, TableRow};
pub use state::{SortDirection, SortModel, TableState};
pub use table::{DataTable, FetchRequest, TableView};
pub use value::{CellValue, FilterScalar, FilterValue};
