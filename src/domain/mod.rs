//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `planning` - Plannings, training sessions and the expiration lifecycle

pub mod foundation;
pub mod planning;
