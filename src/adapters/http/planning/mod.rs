//! HTTP adapter for planning endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ClientPlanningsParams, ClientPlanningsResponse, ErrorResponse, ExpireSessionsResponse,
    PlanningResponse, TrainingSessionResponse,
};
pub use handlers::{PlanningApiError, PlanningAppState};
pub use routes::planning_routes;
