/// Centralized error handling for binder
pub mod binder;

pub use binder::{BinderError, Result};
