use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string of the roster endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Student email. Not format-checked; an empty value is accepted.
    pub email: String,
}

impl EmailQuery {
    /// Query key carrying the student email.
    pub const FIELD: &'static str = "email";
}

/// Confirmation returned by roster changes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body (`{"detail": ...}`), for documentation only.
#[allow(dead_code)]
#[derive(Debug, Serialize, ToSchema)]
pub(super) struct ErrorResponse {
    detail: String,
}
