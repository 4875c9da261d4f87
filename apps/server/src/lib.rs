//! # Campus Server
//!
//! The Mergington High School activities API: an `Axum` application serving
//! the activity catalog, roster changes, the static front-end and `OpenAPI` docs.
//!
//! ## Example
//! ```no_run
//! use campus_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(8000)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;
mod serve;

pub use router::openapi;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use campus::domain::config::ApiConfig;
use campus::kernel::server::ApiState;
use std::path::PathBuf;
use tracing::{info, warn};

/// Collects configuration overrides before the server is assembled.
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cfg.storage.static_dir = dir.into();
        self
    }

    /// Seeds the catalog from a JSON file instead of the built-in activities.
    pub fn seed(mut self, path: impl Into<PathBuf>) -> Self {
        self.cfg.storage.seed = Some(path.into());
        self
    }

    /// Initializes every feature slice and the shared [`ApiState`].
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * The activity seed file is unreadable or invalid
    pub fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            serve::check_tls_files(ssl)?;
        }

        let static_dir = &self.cfg.storage.static_dir;
        if !static_dir.is_dir() {
            warn!(
                static_dir = %static_dir.display(),
                "Static directory not found, the front-end will return 404"
            );
        }

        let slices =
            campus::init(&self.cfg).map_err(|e| anyhow!("Feature initialization failed: {e}"))?;

        let state = ApiState::builder()
            .config(self.cfg)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        info!(
            address = %state.config.server.socket_addr(),
            slices = ?state.slice_names().collect::<Vec<_>>(),
            "Server initialized"
        );
        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The application router, for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Binds the configured address and serves until a shutdown signal.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let server = self.state.config.server.clone();
        info!(scheme = server.scheme(), address = %server.socket_addr(), "Starting server");

        serve::serve(server.socket_addr(), server.ssl.as_ref(), self.router()).await
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}
