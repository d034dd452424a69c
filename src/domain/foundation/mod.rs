//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the planning domain.

mod errors;
mod ids;
mod session_status;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClientId, PlanningId, TrainingSessionId};
pub use session_status::SessionStatus;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
