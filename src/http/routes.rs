use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session views
        .route("/session/status", get(handlers::get_status))
        .route("/session/transcript", get(handlers::get_transcript))
        .route(
            "/session/events",
            get(handlers::get_events).post(handlers::ingest_event),
        )
        // Session control
        .route(
            "/session/events/:group_id/toggle",
            post(handlers::toggle_group),
        )
        .route("/session/messages", post(handlers::send_message))
        .route("/session/reset", post(handlers::reset_session))
        .layer(
            ServiceBuilder::new()
                // Add tracing middleware for request logging
                .layer(TraceLayer::new_for_http())
                // Browser front ends are served from a different origin
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
