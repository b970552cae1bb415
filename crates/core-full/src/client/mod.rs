//! Data-fetch collaborators consumed by steps.
//!
//! Steps only see [`DataFetcher`] and [`ImageFetcher`]. Rate limiting and
//! retry/backoff belong to the implementations ([`HttpClient`]); the pipeline
//! engine never retries a failed step.

pub mod cache;
pub mod config;
pub mod http;

pub use cache::CachedFetcher;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use http::HttpClient;

use binder_core::error::Result;
use serde_json::Value;

/// One blocking call per logical resource.
///
/// `Ok(None)` means the resource does not exist upstream; errors are
/// reserved for failures that survived the implementation's own retries.
pub trait DataFetcher: Send + Sync {
    fn fetch(&self, resource: &str) -> Result<Option<Value>>;
}

/// Raw image download, `Ok(None)` when the image does not exist
pub trait ImageFetcher: Send + Sync {
    fn fetch_image(&self, url: &str) -> Result<Option<Vec<u8>>>;
}
