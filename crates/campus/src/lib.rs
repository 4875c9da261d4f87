//! Facade crate for the campus features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! - Add `campus` with the `server` feature.
//! - Call [`init`] to build every feature slice, then mount [`server::router::api_router`].

pub use campus_domain as domain;
use campus_domain::config::ApiConfig;
use campus_domain::registry::InitializedSlice;
pub use campus_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use campus_kernel::server::ApiState;
        pub use campus_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System routes plus every feature slice's routes.
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router::<ApiState>().merge(campus_activities::server::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use campus_activities as activities;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "activities",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled feature slices.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Activities
    slices.push(features::activities::init(config)?);

    Ok(slices)
}
