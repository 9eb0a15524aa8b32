//! Error types for Libris Core

use crate::types::BookId;
use thiserror::Error;

/// Result type alias using LibrisError
pub type Result<T> = std::result::Result<T, LibrisError>;

/// Top-level error type for all Libris operations
#[derive(Debug, Error)]
pub enum LibrisError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid book id: {0:?}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by a book source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Book not found: {0}")]
    NotFound(BookId),

    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::BackendError(err.to_string()),
        }
    }
}
