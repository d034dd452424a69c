//! Planning command and query handlers.

mod expire_sessions;
mod get_client_plannings;

pub use expire_sessions::{ExpireSessionsCommand, ExpireSessionsHandler, SweepSettings};
pub use get_client_plannings::{GetClientPlanningsHandler, GetClientPlanningsQuery};
