//! SessionStatus enum for the lifecycle of a training session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of a scheduled training session.
///
/// `Scheduled` is the only non-terminal state. `Cancelled` is set by the
/// coaching workflow outside this service and is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Completed,
    Expired,
    Cancelled,
}

impl SessionStatus {
    /// Stored and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "SCHEDULED",
            SessionStatus::Completed => "COMPLETED",
            SessionStatus::Expired => "EXPIRED",
            SessionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Scheduled, Completed) | (Scheduled, Expired) | (Scheduled, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Scheduled => vec![Completed, Expired, Cancelled],
            Completed | Expired | Cancelled => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(SessionStatus::Scheduled),
            "COMPLETED" => Ok(SessionStatus::Completed),
            "EXPIRED" => Ok(SessionStatus::Expired),
            "CANCELLED" => Ok(SessionStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown session status '{}'", other),
            )),
        }
    }
}
