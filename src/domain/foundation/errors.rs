//! Shared error vocabulary.
//!
//! `ValidationError` is raised while building values. `DomainError` is what
//! ports report back across the adapter boundary, tagged with an
//! [`ErrorCode`] so callers can branch without parsing messages.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A value failed its construction rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::EmptyField { field } | Self::InvalidFormat { field, .. } => field,
        }
    }
}

/// Machine-readable category of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Input rejected before any store access.
    ValidationFailed,
    /// A status change the lifecycle does not allow.
    InvalidStateTransition,
    /// The store failed or returned unusable data.
    DatabaseError,
    /// A store call exceeded its time bound.
    StoreTimeout,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StoreTimeout => "STORE_TIMEOUT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported by ports, with free-form key/value context.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Validation failure on `field`; the field name is kept as a detail.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    /// Store failure, worded as "Failed to {operation}: {cause}".
    pub fn database(operation: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::DatabaseError,
            format!("Failed to {}: {}", operation, cause),
        )
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        Self::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::empty_field("client_id").to_string(),
            "Field 'client_id' cannot be empty"
        );
        let err = ValidationError::invalid_format("ends_on", "before starts_on");
        assert_eq!(err.to_string(), "Field 'ends_on' has invalid format: before starts_on");
        assert_eq!(err.field(), "ends_on");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::StoreTimeout, "select timed out");
        assert_eq!(err.to_string(), "[STORE_TIMEOUT] select timed out");
    }

    #[test]
    fn database_error_names_the_operation() {
        let err = DomainError::database("list plannings", "connection refused");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Failed to list plannings: connection refused");
    }

    #[test]
    fn validation_error_converts_with_field_detail() {
        let err: DomainError = ValidationError::empty_field("name").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("name"));
        assert_eq!(err.detail("missing"), None);
    }
}
