//! Planning-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidInput | 400 |
//! | StoreUnavailable | 500 |
//! | InvalidState | 500 |
//!
//! A conditional update that loses a race against a concurrent completion
//! is not an error and has no variant here.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors reported by the planning query and expiration sweep.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    /// Missing or malformed caller input; no store access was attempted.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// The store could not be reached, rejected a write, or timed out.
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store reported a transition the lifecycle forbids.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl PlanningError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlanningError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        PlanningError::StoreUnavailable(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PlanningError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            PlanningError::StoreUnavailable(_) => ErrorCode::DatabaseError,
            PlanningError::InvalidState(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

impl From<ValidationError> for PlanningError {
    fn from(err: ValidationError) -> Self {
        PlanningError::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for PlanningError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => PlanningError::InvalidInput {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => PlanningError::InvalidState(err.message),
            _ => PlanningError::StoreUnavailable(err.to_string()),
        }
    }
}
