//! Router configuration.

use super::handlers;
use super::health::{health_check, readiness_check};
use super::middleware::correlation_id_layer;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `GET /`: the page
/// - `GET /api/todos`: current view of the caller's list
/// - `POST /api/commands`: apply a command to the caller's list
///
/// Both `/api` routes need an `X-Session-ID` header naming the caller's tab.
/// - `GET /health`, `GET /health/ready`: liveness and readiness
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/todos", get(handlers::get_todos))
        .route("/commands", post(handlers::post_command));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
