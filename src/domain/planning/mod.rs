//! Planning domain module.
//!
//! Owns the training-session lifecycle: a session starts `SCHEDULED` and
//! ends `COMPLETED` (external), `EXPIRED` (sweeper) or `CANCELLED`
//! (external). Plannings group a client's sessions in scheduled order.

mod aggregate;
mod errors;
mod session;
mod sweep;

pub use aggregate::{Planning, MAX_NAME_LENGTH};
pub use errors::PlanningError;
pub use session::TrainingSession;
pub use sweep::{SweepCursor, SweepReport};
