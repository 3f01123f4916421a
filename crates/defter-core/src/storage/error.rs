use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors raised by storage initialization and configuration loading.
#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("I/O error during '{operation}' on '{path}': {source}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("schema directory missing: {path}")]
    SchemaDirMissing { path: PathBuf },

    #[error("failed to apply schema file '{file}': {source}")]
    SchemaApply {
        file: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("malformed configuration file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("storage has not been initialized")]
    NotInitialized,

    #[error("storage connection lock is poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageError::Io {
            operation: operation.into(),
            path,
            source,
        }
    }
}
