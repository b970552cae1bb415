// Step registration for core-full pipeline steps
use std::sync::Arc;

use binder_core::error::Result;
use binder_core::pipeline::StepRegistry;

use super::steps::{
    ApplyFixesStep, BuildIndexStep, EnrichTcgStep, FetchPokemonStep, LoadSourceStep,
    RenderBinderStep, SaveOutputStep, TransformSectionsStep,
};
use crate::client::{ClientConfig, DataFetcher, HttpClient, ImageFetcher};
use crate::render::{DocumentRenderer, HtmlBinderRenderer, PdfBinderRenderer};

/// Collaborators shared by every step instance the registry creates
#[derive(Clone)]
pub struct StepServices {
    pub pokeapi: Arc<dyn DataFetcher>,
    pub tcgdex: Arc<dyn DataFetcher>,
    /// Card image downloads, usually the TCGdex client
    pub images: Arc<dyn ImageFetcher>,
    pub html: Arc<dyn DocumentRenderer>,
    pub pdf: Arc<dyn DocumentRenderer>,
}

impl StepServices {
    /// Given fetchers with the built-in HTML and PDF renderers
    pub fn new(
        pokeapi: Arc<dyn DataFetcher>,
        tcgdex: Arc<dyn DataFetcher>,
        images: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            pokeapi,
            tcgdex,
            images,
            html: Arc::new(HtmlBinderRenderer),
            pdf: Arc::new(PdfBinderRenderer),
        }
    }

    /// Live HTTP clients; one TCGdex client serves both card data and images
    pub fn from_configs(pokeapi: ClientConfig, tcgdex: ClientConfig) -> Result<Self> {
        let tcgdex = Arc::new(HttpClient::new(tcgdex)?);
        Ok(Self::new(
            Arc::new(HttpClient::new(pokeapi)?),
            tcgdex.clone(),
            tcgdex,
        ))
    }
}

/// Register all core-full pipeline steps
pub fn register_steps(registry: &mut StepRegistry, services: &StepServices) {
    // File I/O steps
    registry.register("load_source", || Box::new(LoadSourceStep));
    registry.register("save_output", || Box::new(SaveOutputStep));

    // Fetch and enrich steps
    let pokeapi = Arc::clone(&services.pokeapi);
    registry.register("build_index", move || {
        Box::new(BuildIndexStep::new(Arc::clone(&pokeapi)))
    });
    let pokeapi = Arc::clone(&services.pokeapi);
    registry.register("fetch_pokemon", move || {
        Box::new(FetchPokemonStep::new(Arc::clone(&pokeapi)))
    });
    let tcgdex = Arc::clone(&services.tcgdex);
    registry.register("enrich_tcg", move || {
        Box::new(EnrichTcgStep::new(Arc::clone(&tcgdex)))
    });

    // Data processing steps
    registry.register("apply_fixes", || Box::new(ApplyFixesStep));
    registry.register("transform_sections", || Box::new(TransformSectionsStep));

    // Output steps
    let html = Arc::clone(&services.html);
    let pdf = Arc::clone(&services.pdf);
    registry.register("render_binder", move || {
        Box::new(RenderBinderStep::new(Arc::clone(&html), Arc::clone(&pdf)))
    });
}
