use super::health;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Infrastructure routes (`/health`) shared by every deployment.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    health::mark_started();
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
