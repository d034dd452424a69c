//! HTTP handlers for planning endpoints.
//!
//! These handlers connect Axum routes to the planning query and the
//! expiration sweep.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    ExpireSessionsCommand, ExpireSessionsHandler, GetClientPlanningsHandler,
    GetClientPlanningsQuery, SweepSettings,
};
use crate::domain::planning::PlanningError;
use crate::ports::{Clock, PlanningReader, SessionStore};

use super::dto::{ClientPlanningsParams, ClientPlanningsResponse, ErrorResponse, ExpireSessionsResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for planning endpoints.
#[derive(Clone)]
pub struct PlanningAppState {
    pub planning_reader: Arc<dyn PlanningReader>,
    pub session_store: Arc<dyn SessionStore>,
    pub clock: Arc<dyn Clock>,
    pub sweep_settings: SweepSettings,
}

impl PlanningAppState {
    pub fn new(
        planning_reader: Arc<dyn PlanningReader>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            planning_reader,
            session_store,
            clock,
            sweep_settings: SweepSettings::default(),
        }
    }

    pub fn with_sweep_settings(mut self, settings: SweepSettings) -> Self {
        self.sweep_settings = settings;
        self
    }

    /// Create handlers on demand from the shared state.
    pub fn get_client_plannings_handler(&self) -> GetClientPlanningsHandler {
        GetClientPlanningsHandler::new(self.planning_reader.clone())
    }

    pub fn expire_sessions_handler(&self) -> ExpireSessionsHandler {
        ExpireSessionsHandler::with_settings(self.session_store.clone(), self.sweep_settings.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/plannings?client_id=... - Fetch a client's plannings
pub async fn get_client_plannings(
    State(state): State<PlanningAppState>,
    params: Result<Query<ClientPlanningsParams>, QueryRejection>,
) -> Result<impl IntoResponse, PlanningApiError> {
    let Query(params) = params.map_err(|rejection| {
        PlanningError::invalid_input("client_id", format!("Invalid query string: {}", rejection.body_text()))
    })?;
    let query = GetClientPlanningsQuery::from_raw(params.client_id.as_deref())?;
    let client_id = query.client_id.clone();

    let plannings = state.get_client_plannings_handler().handle(query).await?;

    let response = ClientPlanningsResponse::new(client_id.as_str(), &plannings);
    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/plannings/expire-sessions - Run one expiration sweep pass
pub async fn expire_sessions(
    State(state): State<PlanningAppState>,
) -> Result<impl IntoResponse, PlanningApiError> {
    let cmd = ExpireSessionsCommand {
        now: state.clock.now(),
    };

    let report = state.expire_sessions_handler().handle(cmd).await?;

    Ok((StatusCode::OK, Json(ExpireSessionsResponse::from(report))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts planning errors to HTTP responses.
#[derive(Debug)]
pub struct PlanningApiError(PlanningError);

impl From<PlanningError> for PlanningApiError {
    fn from(err: PlanningError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PlanningApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self.0 {
            PlanningError::InvalidInput { message, .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_INPUT", message.clone()),
            ),
            PlanningError::StoreUnavailable(detail) => {
                tracing::error!(error = %detail, "Planning store unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("STORE_UNAVAILABLE", "Planning store is unavailable"),
                )
            }
            PlanningError::InvalidState(detail) => {
                tracing::error!(error = %detail, "Store reported an illegal session transition");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INVALID_STATE", "Session state is inconsistent"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
