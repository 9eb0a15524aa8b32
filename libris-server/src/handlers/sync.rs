//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// SSE event name and JSON payload for a server event
pub fn event_payload(event: &ServerEvent) -> (&'static str, String) {
    let (event_type, data) = match event {
        ServerEvent::BookCreated { id, title } => (
            "book_created",
            serde_json::json!({ "id": id, "title": title }),
        ),
        ServerEvent::BookDeleted { id } => ("book_deleted", serde_json::json!({ "id": id })),
        ServerEvent::ToReadAdded { id, title } => (
            "to_read_added",
            serde_json::json!({ "id": id, "title": title }),
        ),
        ServerEvent::ToReadRemoved { id } => ("to_read_removed", serde_json::json!({ "id": id })),
        ServerEvent::ReadStatusChanged { id, read } => (
            "read_status_changed",
            serde_json::json!({ "id": id, "read": read }),
        ),
        ServerEvent::ThemeChanged { theme } => {
            ("theme_changed", serde_json::json!({ "theme": theme }))
        }
        ServerEvent::Error { message } => ("error", serde_json::json!({ "message": message })),
    };
    (event_type, data.to_string())
}

/// SSE endpoint for real-time updates
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(event) => {
            let (event_type, data) = event_payload(&event);
            Some(Ok(Event::default().event(event_type).data(data)))
        }
        Err(_) => None, // Lagged, skip
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::Theme;

    #[test]
    fn test_event_payloads() {
        let (name, data) = event_payload(&ServerEvent::ReadStatusChanged { id: 4, read: true });
        assert_eq!(name, "read_status_changed");
        assert_eq!(data, r#"{"id":4,"read":true}"#);

        let (name, data) = event_payload(&ServerEvent::ThemeChanged { theme: Theme::Dark });
        assert_eq!(name, "theme_changed");
        assert_eq!(data, r#"{"theme":"dark"}"#);
    }
}
