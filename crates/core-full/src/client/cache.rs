/// Flat JSON file cache in front of a data fetcher
use super::DataFetcher;
use binder_core::error::Result;
use binder_core::util::file::{read_json, sanitize_file_stem, write_json};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Caches every fetched resource as `<cache_dir>/<resource>.json`.
///
/// Existing entries are trusted unless `force` is set. Absent resources are
/// cached as `null` so re-runs do not ask upstream again.
pub struct CachedFetcher {
    inner: Arc<dyn DataFetcher>,
    cache_dir: PathBuf,
    force: bool,
}

impl CachedFetcher {
    pub fn new(inner: Arc<dyn DataFetcher>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache_dir: cache_dir.into(),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn entry_path(&self, resource: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.json", sanitize_file_stem(resource)))
    }

    /// Cached value if present and readable; a corrupt entry counts as a miss
    fn read_entry(&self, path: &Path) -> Option<Option<Value>> {
        if self.force || !path.exists() {
            return None;
        }
        match read_json::<Value>(path) {
            Ok(Value::Null) => Some(None),
            Ok(value) => Some(Some(value)),
            Err(e) => {
                warn!("Ignoring unreadable cache entry {:?}: {}", path, e);
                None
            }
        }
    }
}

impl DataFetcher for CachedFetcher {
    fn fetch(&self, resource: &str) -> Result<Option<Value>> {
        let path = self.entry_path(resource);
        if let Some(cached) = self.read_entry(&path) {
            debug!("Cache hit for {}", resource);
            return Ok(cached);
        }

        let fetched = self.inner.fetch(resource)?;
        write_json(&path, fetched.as_ref().unwrap_or(&Value::Null))?;
        debug!("Cached {} at {:?}", resource, path);
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl DataFetcher for CountingFetcher {
        fn fetch(&self, resource: &str) -> Result<Option<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if resource.ends_with("missing") {
                Ok(None)
            } else {
                Ok(Some(json!({ "resource": resource })))
            }
        }
    }

    fn counting() -> Arc<CountingFetcher> {
        Arc::new(CountingFetcher {
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_second_fetch_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let inner = counting();
        let cache = CachedFetcher::new(inner.clone(), dir.path());

        let first = cache.fetch("pokemon-species/1").unwrap();
        let second = cache.fetch("pokemon-species/1").unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert!(cache.entry_path("pokemon-species/1").exists());
    }

    #[test]
    fn test_absence_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let inner = counting();
        let cache = CachedFetcher::new(inner.clone(), dir.path());

        assert_eq!(cache.fetch("cards/missing").unwrap(), None);
        assert_eq!(cache.fetch("cards/missing").unwrap(), None);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_force_refetches() {
        let dir = tempfile::tempdir().unwrap();
        let inner = counting();
        CachedFetcher::new(inner.clone(), dir.path())
            .fetch("pokemon-species/4")
            .unwrap();
        CachedFetcher::new(inner.clone(), dir.path())
            .with_force(true)
            .fetch("pokemon-species/4")
            .unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_corrupt_entry_is_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let inner = counting();
        let cache = CachedFetcher::new(inner.clone(), dir.path());
        std::fs::write(cache.entry_path("pokemon-species/7"), "{not json").unwrap();

        let value = cache.fetch("pokemon-species/7").unwrap();
        assert_eq!(value, Some(json!({"resource": "pokemon-species/7"})));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
