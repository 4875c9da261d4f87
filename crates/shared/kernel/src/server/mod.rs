//! HTTP plumbing shared by the server application and every feature slice.

mod error;
mod health;
pub mod router;
mod state;

pub use error::ApiError;
pub use health::HealthResponse;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
