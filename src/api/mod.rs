//! HTTP API module for the grade book endpoints, health and metrics.

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{ApiJson, ApiPath, ApiRejection};
pub use handlers::{AppState, ErrorResponse, HealthResponse, MessageResponse};
pub use routes::create_router;
