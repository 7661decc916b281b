use std::path::PathBuf;

use thiserror::Error;

use crate::types::RowId;
use crate::types::datatype::FieldType;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Table '{0}' already exists")]
    AlreadyExists(String),

    #[error("Table '{0}' does not exist")]
    TableNotFound(String),

    #[error("Row with id {id} not found in table '{table}'")]
    RowNotFound { table: String, id: RowId },

    #[error("Malformed database file '{}': {source}", path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Field '{field}' in table '{table}' expects {expected} but got {found}")]
    Validation {
        table: String,
        field: String,
        expected: FieldType,
        found: &'static str,
    },

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize database: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True for both missing tables and missing rows
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::TableNotFound(_) | StoreError::RowNotFound { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
