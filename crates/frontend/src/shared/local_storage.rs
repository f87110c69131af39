//! `KeyValueStore` поверх `window.localStorage`.
//!
//! Все вкладки с одинаковым ключом пишут в одно место: побеждает последняя запись.

use contracts::shared::data_table::{DataTableError, KeyValueStore};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn storage() -> Result<web_sys::Storage, DataTableError> {
    web_sys::window()
        .ok_or_else(|| DataTableError::Storage("no window object".into()))?
        .local_storage()
        .map_err(|e| DataTableError::Storage(format!("localStorage unavailable: {:?}", e)))?
        .ok_or_else(|| DataTableError::Storage("localStorage is disabled".into()))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, DataTableError> {
        storage()?
            .get_item(key)
            .map_err(|e| DataTableError::Storage(format!("get_item failed: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DataTableError> {
        storage()?
            .set_item(key, value)
            .map_err(|e| DataTableError::Storage(format!("set_item failed: {:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), DataTableError> {
        storage()?
            .remove_item(key)
            .map_err(|e| DataTableError::Storage(format!("remove_item failed: {:?}", e)))
    }
}
