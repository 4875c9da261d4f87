use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use campus::domain::constants::INDEX_PATH;
use campus::kernel::server::ApiState;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Mergington High School Activities API"))]
struct ApiDoc;

/// Builds the full application: API routes, docs, front-end and root redirect.
pub fn init(state: ApiState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    // Separate the OpenAPI routes and the API documentation object
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(campus::server::router::api_router())
        .with_state(state)
        .split_for_parts();

    Router::new()
        .route("/", get(|| async { Redirect::temporary(INDEX_PATH) }))
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(api_routes)
        .merge(Scalar::with_url("/api", api_doc))
        .layer(TraceLayer::new_for_http())
}

/// The generated `OpenAPI` document, without building a router.
pub fn openapi() -> utoipa::openapi::OpenApi {
    OpenApiRouter::<ApiState>::with_openapi(ApiDoc::openapi())
        .merge(campus::server::router::api_router())
        .into_openapi()
}
