//! Request handlers

mod library;
mod settings;
mod sync;
mod to_read;
mod view;

pub use library::*;
pub use settings::*;
pub use sync::*;
pub use to_read::*;
pub use view::*;

use crate::state::{AppState, ServerEvent};
use axum::http::StatusCode;
use axum::Json;
use libris_core::{parse_book_id, BookId, LibrisError, Shelves, SourceError};
use serde::Serialize;
use std::sync::Arc;

/// Error half of every fallible handler
pub type ApiError = (StatusCode, String);

/// Parse a path id, rejecting anything non-numeric with 400
pub(crate) fn book_id(raw: &str) -> Result<BookId, ApiError> {
    parse_book_id(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

/// Map a catalog failure: unknown ids are 404, everything else is upstream
pub(crate) fn source_error(e: SourceError) -> ApiError {
    match e {
        SourceError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        _ => (StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

/// Log and report a failed store write
pub(crate) fn persist_error(state: &AppState, what: &str, e: LibrisError) -> ApiError {
    tracing::error!("Failed to save {}: {}", what, e);
    let message = format!("Failed to save {}", what);
    state.broadcast(ServerEvent::Error {
        message: message.clone(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Run a store mutation on the blocking pool
///
/// The write guard travels with the task, so the shelves stay locked
/// until the file writes finish.
pub(crate) async fn update_shelves<T, F>(state: &AppState, what: &str, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut Shelves) -> libris_core::Result<T> + Send + 'static,
{
    let mut shelves = Arc::clone(&state.shelves).write_owned().await;
    tokio::task::spawn_blocking(move || f(&mut *shelves))
        .await
        .map_err(|e| {
            tracing::error!("Store task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Task failed: {}", e),
            )
        })?
        .map_err(|e| persist_error(state, what, e))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::storage::StorageResult;
    use libris_core::{Book, KeyValueStore, MemorySource, MemoryStorage, StorageError};

    /// Storage whose writes always fail
    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::PermissionDenied("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::PermissionDenied("read-only".to_string()))
        }

        fn keys(&self) -> StorageResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_update_shelves_runs_mutation() {
        let state = AppState::from_parts(
            Arc::new(MemorySource::new()),
            Arc::new(MemoryStorage::new()),
        );

        let count = update_shelves(&state, "to-read list", |shelves| {
            shelves.to_read.add(Book::new(1, "Dune", "Frank Herbert"))?;
            Ok(shelves.to_read.len())
        })
        .await
        .unwrap();

        assert_eq!(count, 1);
        assert!(state.shelves.read().await.to_read.contains(1));
    }

    #[tokio::test]
    async fn test_update_shelves_reports_failed_write() {
        let state = AppState::from_parts(Arc::new(MemorySource::new()), Arc::new(ReadOnly));
        let mut rx = state.subscribe();

        let (status, message) = update_shelves(&state, "read state", |shelves| {
            shelves.read.mark_read(1)
        })
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Failed to save read state");
        assert_eq!(
            rx.recv().await.unwrap(),
            ServerEvent::Error {
                message: "Failed to save read state".to_string()
            }
        );
        // Rolled back, and the lock is released again
        assert!(!state.shelves.read().await.read.is_read(1));
    }
}
