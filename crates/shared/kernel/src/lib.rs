//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, the API state
//! registry and the HTTP error shape every slice renders.
//!
//! ## Config loading
//! ```rust,no_run
//! use campus_kernel::config::load_config;
//! use campus_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! assert!(cfg.server.port > 0);
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use campus_domain as domain;
