//! Type-erased registry entries for feature slices.
//!
//! Each vertical slice hands the kernel one [`InitializedSlice`]; handlers
//! later recover the concrete state through [`InitializedSlice::downcast`].

use std::any::{Any, TypeId, type_name};
use std::fmt::Debug;

/// Feature state that can be shared across request handlers.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// A registered feature slice.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    /// Fully qualified type name, used in logs and error messages.
    pub name: &'static str,
    state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>(), state: Box::new(state) }
    }

    /// Returns the concrete state if this entry holds a `T`.
    #[must_use]
    pub fn downcast<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}
