//! HTTP API module.
//!
//! Route definitions, shared state, and the handlers that translate
//! collaborator outcomes into status codes.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use handlers::{HealthResponse, TokenResponse};
pub use routes::create_router;
pub use state::AppState;
