#![cfg(feature = "server")]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use campus_kernel::server::router::system_router;
use http_body_util::BodyExt as _;
use tower::ServiceExt as _;

#[tokio::test]
async fn health_reports_up_without_caching() {
    let (router, _api) = system_router::<()>().split_for_parts();
    let app: Router = router;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store, no-cache, must-revalidate"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
