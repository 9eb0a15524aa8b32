//! To-read list handlers

use super::{book_id, source_error, update_shelves, ApiError};
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    Json,
};
use libris_core::{Book, BookId};
use serde::Serialize;

/// Books on the to-read list, in insertion order
pub async fn list_to_read(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.shelves.read().await.to_read.list())
}

/// Result of a list change
#[derive(Debug, Serialize)]
pub struct ToReadChange {
    pub id: BookId,

    /// Whether the list actually changed
    pub changed: bool,

    /// List size after the change
    pub count: usize,
}

/// Put a catalog book on the to-read list
///
/// Adding a book that is already listed is a no-op.
pub async fn add_to_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToReadChange>, ApiError> {
    let id = book_id(&id)?;
    let book = state.source.get_book(id).await.map_err(source_error)?;
    let title = book.title.clone();

    let (changed, count) = update_shelves(&state, "to-read list", move |shelves| {
        let changed = shelves.to_read.add(book)?;
        Ok((changed, shelves.to_read.len()))
    })
    .await?;

    if changed {
        state.broadcast(ServerEvent::ToReadAdded { id, title });
    }
    Ok(Json(ToReadChange { id, changed, count }))
}

/// Take a book off the to-read list
///
/// The book does not need to exist in the catalog any more.
pub async fn remove_to_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToReadChange>, ApiError> {
    let id = book_id(&id)?;

    let (changed, count) = update_shelves(&state, "to-read list", move |shelves| {
        let changed = shelves.to_read.remove(id)?;
        Ok((changed, shelves.to_read.len()))
    })
    .await?;

    if changed {
        state.broadcast(ServerEvent::ToReadRemoved { id });
    }
    Ok(Json(ToReadChange { id, changed, count }))
}
