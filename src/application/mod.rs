//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Reads go through `GetClientPlanningsHandler`; the only write path is the
//! expiration sweep in `ExpireSessionsHandler`.

pub mod handlers;

pub use handlers::{
    ExpireSessionsCommand, ExpireSessionsHandler, GetClientPlanningsHandler,
    GetClientPlanningsQuery, SweepSettings,
};
