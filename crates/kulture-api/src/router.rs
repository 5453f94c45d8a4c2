use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Regions
        .route("/api/v1/regions", get(handlers::list_regions))
        .route("/api/v1/regions/{name}", get(handlers::get_region))
        .route("/api/v1/regions/{name}/bundle", get(handlers::get_region_bundle))
        .route("/api/v1/regions/{name}/map", get(handlers::get_region_map))

        // Events and guide
        .route("/api/v1/events", get(handlers::list_events))
        .route("/api/v1/guide", get(handlers::get_guide))

        // Navigation sessions
        .route("/api/v1/sessions", post(handlers::create_session))
        .route(
            "/api/v1/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/v1/sessions/{session_id}/actions", post(handlers::post_action))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
