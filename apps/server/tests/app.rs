use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use campus::domain::config::ApiConfig;
use campus_server::Server;
use http_body_util::BodyExt as _;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt as _;

fn make_app() -> anyhow::Result<(Router, TempDir)> {
    let static_dir = tempfile::tempdir()?;
    fs::write(static_dir.path().join("index.html"), "<h1>Mergington High School</h1>")?;

    let server = Server::builder().static_dir(static_dir.path()).build()?;
    Ok((server.router(), static_dir))
}

async fn get(app: &Router, uri: &str) -> anyhow::Result<axum::response::Response> {
    let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty())?;
    Ok(app.clone().oneshot(request).await?)
}

async fn body_text(response: axum::response::Response) -> anyhow::Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn root_redirects_to_front_end() -> anyhow::Result<()> {
    let (app, _dir) = make_app()?;

    let response = get(&app, "/").await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/static/index.html");

    let response = get(&app, "/static/index.html").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await?.contains("Mergington High School"));
    Ok(())
}

#[tokio::test]
async fn missing_static_file_is_404() -> anyhow::Result<()> {
    let (app, _dir) = make_app()?;
    assert_eq!(get(&app, "/static/missing.js").await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn api_system_and_docs_routes_are_mounted() -> anyhow::Result<()> {
    let (app, _dir) = make_app()?;

    let response = get(&app, "/activities").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let catalog: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;
    assert!(catalog.get("Programming Class").is_some());

    assert_eq!(get(&app, "/health").await?.status(), StatusCode::OK);
    assert_eq!(get(&app, "/api").await?.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn signups_persist_across_requests() -> anyhow::Result<()> {
    let (app, _dir) = make_app()?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/activities/Debate%20Team/signup?email=new@mergington.edu")
        .body(Body::empty())?;
    assert_eq!(app.clone().oneshot(request).await?.status(), StatusCode::OK);

    let catalog: serde_json::Value =
        serde_json::from_str(&body_text(get(&app, "/activities").await?).await?)?;
    let roster = catalog["Debate Team"]["participants"].as_array().cloned().unwrap_or_default();
    assert!(roster.contains(&serde_json::Value::from("new@mergington.edu")));
    Ok(())
}

#[test]
fn openapi_documents_every_route() {
    let doc = campus_server::openapi();
    let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

    for expected in [
        "/health",
        "/activities",
        "/activities/{activity_name}/signup",
        "/activities/{activity_name}/remove",
    ] {
        assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
    }
}

#[test]
fn bad_seed_fails_build() {
    let err = Server::builder()
        .seed("/definitely/not/here.json")
        .build()
        .expect_err("seed file is missing");
    assert!(err.to_string().contains("Feature initialization failed"), "{err}");
}

#[test]
fn missing_ssl_files_fail_build() {
    let mut cfg = ApiConfig::default();
    cfg.server.ssl = Some(campus::domain::config::SslConfig {
        cert: "/definitely/not/cert.pem".into(),
        key: "/definitely/not/key.pem".into(),
    });

    let err = Server::builder().config(cfg).build().expect_err("ssl files are missing");
    assert!(err.to_string().contains("SSL certificate not found"), "{err}");
}
