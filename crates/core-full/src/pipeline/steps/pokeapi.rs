use crate::client::{CachedFetcher, DataFetcher};
use crate::io::NameIndex;
use binder_core::error::Result;
use binder_core::pipeline::{PipelineContext, Step, StepParams, keys};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolve each card's species and attach its multilingual names
pub struct FetchPokemonStep {
    pokeapi: Arc<dyn DataFetcher>,
}

impl FetchPokemonStep {
    pub fn new(pokeapi: Arc<dyn DataFetcher>) -> Self {
        Self { pokeapi }
    }
}

impl Step for FetchPokemonStep {
    fn name(&self) -> &str {
        "FetchPokemon"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let index = NameIndex::load(&params.require_path("index_file")?)?;
        let fetcher = CachedFetcher::new(Arc::clone(&self.pokeapi), params.require_path("cache_dir")?)
            .with_force(params.bool_or("force", false)?);

        let mut resolved = 0;
        let mut unresolved = 0;
        let mut missing = 0;

        let cards = context.for_each_card(params.step(), |section, card| {
            let Some(reference) = card.get(keys::POKEMON).cloned() else {
                return Ok(());
            };
            let Some(id) = index.resolve(&reference) else {
                warn!("[{}] No species matches {}", section, reference);
                unresolved += 1;
                return Ok(());
            };

            match fetcher.fetch(&format!("pokemon-species/{}", id))? {
                Some(species) => {
                    card.insert(keys::ID.to_string(), json!(id));
                    card.insert(keys::NAMES.to_string(), Value::Object(species_names(&species)));
                    debug!("[{}] {} -> #{}", section, reference, id);
                    resolved += 1;
                }
                None => {
                    warn!("[{}] Species #{} not found upstream", section, id);
                    card.insert(keys::ID.to_string(), json!(id));
                    missing += 1;
                }
            }
            Ok(())
        })?;

        info!(
            "Species data: {} resolved, {} unresolved, {} missing of {} cards",
            resolved, unresolved, missing, cards
        );
        context.record(
            params.step(),
            json!({
                "cards": cards,
                "resolved": resolved,
                "unresolved": unresolved,
                "missing": missing
            }),
        );
        Ok(context)
    }
}

/// `names` array of a species resource as a language -> name map
pub fn species_names(species: &Value) -> Map<String, Value> {
    let mut names = Map::new();
    let Some(entries) = species.get("names").and_then(Value::as_array) else {
        return names;
    };
    for entry in entries {
        let lang = entry
            .get("language")
            .and_then(|l| l.get("name"))
            .and_then(Value::as_str);
        let name = entry.get("name").and_then(Value::as_str);
        if let (Some(lang), Some(name)) = (lang, name) {
            names.insert(lang.to_string(), Value::String(name.to_string()));
        }
    }
    names
}
