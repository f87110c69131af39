pub mod components;
pub mod data_table;
pub mod icons;
pub mod local_storage;
