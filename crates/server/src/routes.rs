//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Enforced before any multipart parsing happens.
    let max_body = state.config.limits.max_body_bytes();

    Router::new()
        .route("/", get(handlers::index))
        // Health check (intentionally unauthenticated for probes)
        .route("/health", get(handlers::health_check))
        .route("/file", post(handlers::upload_font))
        // `/font` serves the same handler for clients using the older path.
        .route("/font", post(handlers::upload_font))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
