// Step registration for asset pipeline steps
use std::sync::Arc;

use binder_core::pipeline::StepRegistry;
use binder_core_full::ImageFetcher;

use crate::steps::CacheImagesStep;

/// Register all asset pipeline steps
pub fn register_steps(registry: &mut StepRegistry, images: Arc<dyn ImageFetcher>) {
    registry.register("cache_images", move || {
        Box::new(CacheImagesStep::new(Arc::clone(&images)))
    });
}
