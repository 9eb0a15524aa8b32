//! Settings and statistics handlers

use super::{source_error, update_shelves, ApiError};
use crate::state::{AppState, ServerEvent};
use axum::{extract::State, Json};
use libris_core::{LibraryStats, Theme};
use serde::{Deserialize, Serialize};

/// Current preferences
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub theme: Theme,

    /// Whether the theme was chosen rather than the system default
    pub explicit: bool,
}

#[derive(Debug, Deserialize)]
pub struct SettingsUpdate {
    pub theme: Theme,
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let shelves = state.shelves.read().await;
    Json(SettingsResponse {
        theme: shelves.preferences.theme(),
        explicit: shelves.preferences.is_explicit(),
    })
}

/// Change the theme
pub async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let theme = update.theme;
    let previous = update_shelves(&state, "settings", move |shelves| {
        let previous = shelves.preferences.theme();
        shelves.preferences.set_theme(theme)?;
        Ok(previous)
    })
    .await?;

    if previous != update.theme {
        state.broadcast(ServerEvent::ThemeChanged {
            theme: update.theme,
        });
    }
    Ok(Json(SettingsResponse {
        theme: update.theme,
        explicit: true,
    }))
}

/// Library statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<LibraryStats>, ApiError> {
    let books = state.source.list_books().await.map_err(source_error)?;
    let shelves = state.shelves.read().await;
    Ok(Json(LibraryStats::collect(&books, &shelves.status())))
}
