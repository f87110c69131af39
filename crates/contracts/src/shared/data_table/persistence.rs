//! Сохранение фильтров таблицы в key-value хранилище.
//!
//! Ключ: `"<namespace>_<tableKey>"`, значение: JSON
//! `{"filters": {...}, "operators": {...}}`. Без срока жизни и версий:
//! при смене схемы меняется namespace.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::error::{DataTableError, Result};
use super::operator::FilterOperator;
use super::value::FilterValue;

pub const DEFAULT_NAMESPACE: &str = "datatable_filters_v9";

/// Key-value store injected into the table (browser localStorage, in-memory in tests)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store; clones share the same contents
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Persisted part of the table state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedFilters {
    pub filters: BTreeMap<String, FilterValue>,
    pub operators: BTreeMap<String, FilterOperator>,
}

pub fn storage_key(namespace: &str, table_key: &str) -> String {
    format!("{}_{}", namespace, table_key)
}

pub struct FilterPersistence {
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl FilterPersistence {
    pub fn new(store: Rc<dyn KeyValueStore>, namespace: &str, table_key: &str) -> Self {
        Self {
            store,
            key: storage_key(namespace, table_key),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the saved state.
    ///
    /// Missing key: `Ok(None)`. Invalid JSON: `CorruptPersistedState`.
    /// Valid JSON without `filters`/`operators`: ignored, `Ok(None)`.
    pub fn restore(&self) -> Result<Option<PersistedFilters>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|source| DataTableError::CorruptPersistedState {
                key: self.key.clone(),
                source,
            })?;
        match serde_json::from_value::<PersistedFilters>(value) {
            Ok(persisted) => {
                log::debug!("restored filters from '{}'", self.key);
                Ok(Some(persisted))
            }
            Err(e) => {
                log::warn!("ignoring persisted filters under '{}': {}", self.key, e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, persisted: &PersistedFilters) -> Result<()> {
        let raw = serde_json::to_string(persisted)?;
        self.store.set(&self.key, &raw)
    }
}
