//! API routes

use crate::config::CorsOrigins;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the CORS layer for the configured origins
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(origins) => {
            let allowed: Vec<HeaderValue> =
                origins.iter().filter_map(|s| s.parse().ok()).collect();
            AllowOrigin::list(allowed)
        }
        // Default: allow localhost origins for development
        CorsOrigins::Development => AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ]),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState, cors: &CorsOrigins) -> Router {
    let api_routes = Router::new()
        // Library endpoints
        .route(
            "/library",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/library/:id",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .route(
            "/library/:id/read",
            put(handlers::mark_read).delete(handlers::mark_unread),
        )
        // View session
        .route(
            "/view",
            get(handlers::get_view).patch(handlers::update_view),
        )
        .route("/view/page", post(handlers::navigate_view))
        // Reading lists
        .route("/to-read", get(handlers::list_to_read))
        .route(
            "/to-read/:id",
            post(handlers::add_to_read).delete(handlers::remove_to_read),
        )
        // Settings
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route("/stats", get(handlers::get_stats))
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)),
        )
        .with_state(state)
}
