//! Names shared between the API surface and its documentation.

/// `OpenAPI` tag for infrastructure endpoints (health, docs).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the extracurricular activities endpoints.
pub const ACTIVITIES_TAG: &str = "Activities";

/// Prefix for environment variable overrides (`CAMPUS__SERVER__PORT`).
pub const ENV_PREFIX: &str = "CAMPUS";
/// Front-end entry point the root path redirects to.
pub const INDEX_PATH: &str = "/static/index.html";
