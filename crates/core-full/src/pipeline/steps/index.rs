use crate::client::DataFetcher;
use crate::io::NameIndex;
use binder_core::config::constants;
use binder_core::error::{BinderError, Result};
use binder_core::pipeline::{PipelineContext, Step, StepParams};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Build the species name -> id index file from PokeAPI
pub struct BuildIndexStep {
    pokeapi: Arc<dyn DataFetcher>,
}

impl BuildIndexStep {
    pub fn new(pokeapi: Arc<dyn DataFetcher>) -> Self {
        Self { pokeapi }
    }
}

impl Step for BuildIndexStep {
    fn name(&self) -> &str {
        "BuildIndex"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let output = params.require_path("output")?;
        let limit = params.u64_or("limit", constants::DEFAULT_INDEX_LIMIT)?;
        let force = params.bool_or("force", false)?;

        if output.exists() && !force {
            info!("Name index {} already exists, skipping", output.display());
            context.record(params.step(), json!({ "skipped": true }));
            return Ok(context);
        }

        let resource = format!("pokemon-species?limit={}", limit);
        let list = self
            .pokeapi
            .fetch(&resource)?
            .ok_or_else(|| BinderError::http(format!("{} returned no data", resource)))?;
        let index = NameIndex::from_species_list(&list)?;
        index.save(&output)?;
        info!("Wrote {} species names to {}", index.len(), output.display());

        context.record(
            params.step(),
            json!({ "skipped": false, "entries": index.len() }),
        );
        Ok(context)
    }
}
