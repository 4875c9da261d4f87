//! `/activities` routes.

mod handlers;
mod models;

pub use models::{EmailQuery, MessageResponse};

use campus_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes for listing activities and managing rosters.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_activities))
        .routes(routes!(handlers::signup))
        .routes(routes!(handlers::remove_participant))
}
