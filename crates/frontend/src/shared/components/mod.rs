pub mod column_menu;
pub mod filter_bar;
pub mod pagination_controls;
pub mod sortable_header_cell;
pub mod table_checkbox;

pub use column_menu::ColumnMenu;
pub use filter_bar::FilterBar;
pub use pagination_controls::PaginationControls;
pub use sortable_header_cell::SortableHeaderCell;
pub use table_checkbox::{TableCheckbox, TableHeaderCheckbox};
