//! HTTP DTOs for planning endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionStatus;
use crate::domain::planning::{Planning, SweepReport, TrainingSession};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for fetching a client's plannings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPlanningsParams {
    #[serde(default, alias = "clientId")]
    pub client_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct TrainingSessionResponse {
    pub id: String,
    pub planning_id: String,
    pub scheduled_at: String,
    pub status: SessionStatus,
    pub updated_at: String,
}

impl From<&TrainingSession> for TrainingSessionResponse {
    fn from(session: &TrainingSession) -> Self {
        Self {
            id: session.id().to_string(),
            planning_id: session.planning_id().to_string(),
            scheduled_at: session.scheduled_at().to_rfc3339(),
            status: session.status(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// A planning with its sessions in scheduled order.
#[derive(Debug, Clone, Serialize)]
pub struct PlanningResponse {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub starts_on: String,
    pub ends_on: String,
    pub created_at: String,
    pub sessions: Vec<TrainingSessionResponse>,
}

impl From<&Planning> for PlanningResponse {
    fn from(planning: &Planning) -> Self {
        Self {
            id: planning.id().to_string(),
            client_id: planning.client_id().to_string(),
            name: planning.name().to_string(),
            starts_on: planning.starts_on().to_string(),
            ends_on: planning.ends_on().to_string(),
            created_at: planning.created_at().to_rfc3339(),
            sessions: planning.sessions().iter().map(Into::into).collect(),
        }
    }
}

/// Every planning owned by one client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientPlanningsResponse {
    pub client_id: String,
    pub plannings: Vec<PlanningResponse>,
}

impl ClientPlanningsResponse {
    pub fn new(client_id: impl Into<String>, plannings: &[Planning]) -> Self {
        Self {
            client_id: client_id.into(),
            plannings: plannings.iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a triggered sweep pass.
#[derive(Debug, Clone, Serialize)]
pub struct ExpireSessionsResponse {
    pub message: String,
    pub expired_count: u64,
    pub swept_at: String,
}

impl From<SweepReport> for ExpireSessionsResponse {
    fn from(report: SweepReport) -> Self {
        Self {
            message: format!("{} session(s) expired", report.expired),
            expired_count: report.expired,
            swept_at: report.cutoff.to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClientId, PlanningId, Timestamp, TrainingSessionId};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 4, hour, 0, 0).unwrap().into()
    }

    #[test]
    fn params_accept_snake_and_camel_case() {
        let snake: ClientPlanningsParams = serde_json::from_str(r#"{"client_id": "c-1"}"#).unwrap();
        let camel: ClientPlanningsParams = serde_json::from_str(r#"{"clientId": "c-1"}"#).unwrap();
        let none: ClientPlanningsParams = serde_json::from_str("{}").unwrap();

        assert_eq!(snake.client_id.as_deref(), Some("c-1"));
        assert_eq!(camel.client_id.as_deref(), Some("c-1"));
        assert!(none.client_id.is_none());
    }

    #[test]
    fn planning_response_carries_sessions_and_wire_status() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut planning = Planning::new(
            PlanningId::new(),
            ClientId::new("c-1").unwrap(),
            "Base",
            day,
            day,
            at(6),
        )
        .unwrap();
        planning
            .add_session(TrainingSession::schedule(
                TrainingSessionId::new(),
                *planning.id(),
                at(10),
                at(6),
            ))
            .unwrap();

        let response = ClientPlanningsResponse::new("c-1", &[planning]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["client_id"], "c-1");
        assert_eq!(json["plannings"][0]["name"], "Base");
        assert_eq!(json["plannings"][0]["starts_on"], "2024-03-04");
        assert_eq!(json["plannings"][0]["sessions"][0]["status"], "SCHEDULED");
    }

    #[test]
    fn sweep_response_from_report() {
        let mut report = SweepReport::new(at(12));
        report.expired = 3;

        let response = ExpireSessionsResponse::from(report);

        assert_eq!(response.expired_count, 3);
        assert_eq!(response.swept_at, at(12).to_rfc3339());
        assert_eq!(response.message, "3 session(s) expired");
    }

    #[test]
    fn error_response_has_only_code_and_message() {
        let json = serde_json::to_value(ErrorResponse::new("INVALID_INPUT", "nope")).unwrap();
        assert_eq!(json, serde_json::json!({"code": "INVALID_INPUT", "message": "nope"}));
    }
}
