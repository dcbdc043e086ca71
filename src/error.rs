//! Error types
//!
//! `StorageError` covers everything below the command layer: walking the
//! workspace, reading documents, and the SQLite index. `ApiError` is what
//! commands and the CLI surface to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, reading, or persisting the node index.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk workspace: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid index record: {0}")]
    InvalidRecord(String),

    #[error("No index found at {0}; run `tg index` first")]
    NotIndexed(PathBuf),
}

/// Errors returned by commands.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("No .taskgraph found. Run `tg init` or `tg add \"task text\"`.")]
    NotInitialized,

    #[error("Migration failed: {0}")]
    MigrationError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::StorageError(StorageError::IoError(err))
    }
}
