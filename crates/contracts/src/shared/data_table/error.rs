use thiserror::Error;

/// Errors raised by the data table engine.
///
/// Normal filtering, sorting and pagination never fail: a filter value that
/// cannot be compared simply excludes the row.
#[derive(Debug, Error)]
pub enum DataTableError {
    #[error("persisted filter state under key '{key}' is not valid JSON: {source}")]
    CorruptPersistedState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize filter state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("page size {size} is not one of {options:?}")]
    InvalidPageSize { size: usize, options: Vec<usize> },

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("select column '{0}' has no value options")]
    MissingValueOptions(String),

    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    #[error("invalid table config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DataTableError>;
