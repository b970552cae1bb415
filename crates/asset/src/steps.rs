use binder_core::error::Result;
use binder_core::pipeline::{PipelineContext, Step, StepParams, keys};
use binder_core::util::file::{sanitize_file_stem, write_atomic};
use binder_core_full::ImageFetcher;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Download card images into a local directory and point `image_path` at them
pub struct CacheImagesStep {
    images: Arc<dyn ImageFetcher>,
}

impl CacheImagesStep {
    pub fn new(images: Arc<dyn ImageFetcher>) -> Self {
        Self { images }
    }

    /// Fetch `url` into `path` unless a non-empty copy is already there.
    /// `Some(true)` when downloaded, `Some(false)` when reused, `None` if upstream has no such image.
    fn ensure_local(&self, url: &str, path: &Path, force: bool) -> Result<Option<bool>> {
        if !force && is_usable(path) {
            return Ok(Some(false));
        }
        let Some(bytes) = self.images.fetch_image(url)? else {
            return Ok(None);
        };
        write_atomic(path, &bytes)?;
        Ok(Some(true))
    }
}

impl Step for CacheImagesStep {
    fn name(&self) -> &str {
        "CacheImages"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let cache_dir = params.require_path("cache_dir")?;
        let force = params.bool_or("force", false)?;
        std::fs::create_dir_all(&cache_dir)?;

        let mut downloaded = 0;
        let mut cached = 0;
        let mut missing = 0;

        let cards = context.for_each_card(params.step(), |section, card| {
            let Some(url) = card
                .get(keys::IMAGE)
                .and_then(Value::as_str)
                .filter(|url| is_remote(url))
                .map(str::to_string)
            else {
                return Ok(());
            };

            let path = cached_image_path(&cache_dir, &url);
            match self.ensure_local(&url, &path, force)? {
                Some(fetched) => {
                    if fetched {
                        debug!("[{}] Downloaded {}", section, url);
                        downloaded += 1;
                    } else {
                        cached += 1;
                    }
                    card.insert(keys::IMAGE_PATH.to_string(), json!(path.display().to_string()));
                }
                None => {
                    warn!("[{}] Image not found: {}", section, url);
                    missing += 1;
                }
            }
            Ok(())
        })?;

        info!(
            "Images: {} downloaded, {} cached, {} missing ({} cards)",
            downloaded, cached, missing, cards
        );
        context.record(
            params.step(),
            json!({
                "cache_dir": cache_dir.display().to_string(),
                "downloaded": downloaded,
                "cached": cached,
                "missing": missing
            }),
        );
        Ok(context)
    }
}

fn is_usable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.len() > 0)
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Flat file name for an image URL: host dropped, path segments joined
pub fn image_file_name(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .split_once('/')
        .map_or(without_scheme, |(_, path)| path);
    let path = path.split(['?', '#']).next().unwrap_or(path);
    sanitize_file_stem(path)
}

/// Local path a cached image for `url` would have
pub fn cached_image_path(cache_dir: &Path, url: &str) -> PathBuf {
    cache_dir.join(image_file_name(url))
}
