//! Axum router configuration for planning endpoints.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;

use super::handlers::{expire_sessions, get_client_plannings, PlanningAppState};

/// Create the planning API router, mounted under `/api`.
///
/// # Routes
/// - `GET /plannings?client_id=...` - Fetch a client's plannings
/// - `POST /plannings/expire-sessions` - Run one expiration sweep pass
///
/// `request_timeout` covers the fetch only. A sweep is bounded by its own
/// pass timeout so a slow pass still answers with a JSON error body.
pub fn planning_routes(request_timeout: Duration) -> Router<PlanningAppState> {
    Router::new()
        .route("/plannings", get(get_client_plannings))
        .route_layer(TimeoutLayer::new(request_timeout))
        .route("/plannings/expire-sessions", post(expire_sessions))
}
