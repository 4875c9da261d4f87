//! Extracurricular activities slice.
//!
//! Owns the in-memory catalog and the roster rules (no duplicate signups,
//! no signups past capacity). With the `server` feature it also exposes the
//! `/activities` HTTP routes.

mod error;
pub mod seed;
#[cfg(feature = "server")]
pub mod server;
mod store;

pub use crate::error::ActivityError;
pub use crate::store::ActivityStore;

use campus_kernel::domain::activity::Catalog;
use campus_kernel::prelude::{ApiConfig, FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Activities feature state, cheap to clone into handlers.
#[derive(Debug, Clone)]
pub struct Activities {
    store: Arc<ActivityStore>,
}

impl Activities {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { store: Arc::new(ActivityStore::new(catalog)) }
    }
}

impl Deref for Activities {
    type Target = ActivityStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl FeatureSlice for Activities {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the activities feature.
///
/// Seeds the catalog from `storage.seed` when configured, otherwise from
/// [`seed::default_catalog`].
///
/// # Errors
/// Returns an error if the configured seed file is unreadable or invalid.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, ActivityError> {
    let catalog = match &config.storage.seed {
        Some(path) => seed::load_catalog(path)?,
        None => seed::default_catalog(),
    };

    tracing::info!(
        activities = catalog.len(),
        seed = ?config.storage.seed,
        "Activities slice initialized"
    );

    Ok(InitializedSlice::new(Activities::new(catalog)))
}
