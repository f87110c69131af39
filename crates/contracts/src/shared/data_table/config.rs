use serde::{Deserialize, Serialize};

use super::error::{DataTableError, Result};
use super::persistence::DEFAULT_NAMESPACE;

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

fn default_rows_per_page() -> usize {
    10
}

/// Table instance settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Scopes persisted filters; tables with the same key share them
    pub table_key: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Server mode: filtering, sorting and pagination are done by the backend
    #[serde(default)]
    pub server_side: bool,
    /// Filter changes wait for an explicit Search
    #[serde(default)]
    pub search_on_button: bool,
    #[serde(default)]
    pub checkbox_selection: bool,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

impl DataTableConfig {
    pub fn new(table_key: &str) -> Self {
        Self {
            table_key: table_key.to_string(),
            namespace: default_namespace(),
            server_side: false,
            search_on_button: false,
            checkbox_selection: false,
            page_size_options: default_page_size_options(),
            rows_per_page: default_rows_per_page(),
        }
    }

    pub fn server_side(mut self) -> Self {
        self.server_side = true;
        self
    }

    pub fn search_on_button(mut self) -> Self {
        self.search_on_button = true;
        self
    }

    pub fn checkbox_selection(mut self) -> Self {
        self.checkbox_selection = true;
        self
    }

    pub fn with_page_sizes(mut self, options: Vec<usize>, rows_per_page: usize) -> Self {
        self.page_size_options = options;
        self.rows_per_page = rows_per_page;
        self
    }

    pub fn check_page_size(&self, size: usize) -> Result<()> {
        if self.page_size_options.contains(&size) {
            Ok(())
        } else {
            Err(DataTableError::InvalidPageSize {
                size,
                options: self.page_size_options.clone(),
            })
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.table_key.trim().is_empty() {
            return Err(DataTableError::InvalidConfig("table_key is empty".into()));
        }
        if self.page_size_options.is_empty() || self.page_size_options.contains(&0) {
            return Err(DataTableError::InvalidConfig(
                "page_size_options must be non-empty and positive".into(),
            ));
        }
        self.check_page_size(self.rows_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let cfg: DataTableConfig = serde_json::from_str(r#"{"table_key":"users"}"#).unwrap();
        assert_eq!(cfg, DataTableConfig::new("users"));
        assert_eq!(cfg.namespace, "datatable_filters_v9");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rows_per_page_must_be_an_option() {
        let cfg = DataTableConfig::new("users").with_page_sizes(vec![5, 20], 10);
        assert!(matches!(
            cfg.validate(),
            Err(DataTableError::InvalidPageSize { size: 10, .. })
        ));
    }

    #[test]
    fn test_empty_table_key_rejected() {
        assert!(matches!(
            DataTableConfig::new(" ").validate(),
            Err(DataTableError::InvalidConfig(_))
        ));
    }
}
