//! HTTP adapters - REST API implementations.
//!
//! - `health` - `GET /health`, outside the API prefix
//! - `planning` - planning query and sweep trigger under `/api`

pub mod health;
pub mod planning;

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;

pub use planning::{planning_routes, PlanningAppState};

/// Assemble the full application router with its middleware stack.
///
/// The request timeout wraps every route except the sweep trigger.
pub fn app_router(state: PlanningAppState, config: &ServerConfig) -> Router {
    let timeout = config.request_timeout();
    Router::new()
        .merge(health::router().layer(TimeoutLayer::new(timeout)))
        .nest("/api", planning_routes(timeout).with_state(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer(config))
}

/// Build the CORS layer from configured origins; unparsable entries are
/// skipped with a warning.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
