use super::languages_param;
use crate::client::{CachedFetcher, DataFetcher};
use binder_core::error::Result;
use binder_core::pipeline::{PipelineContext, Step, StepParams, keys};
use binder_core::util::json::as_text;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, info};

/// Attach TCGdex card records (name, image, rarity, illustrator) per language
pub struct EnrichTcgStep {
    tcgdex: Arc<dyn DataFetcher>,
}

impl EnrichTcgStep {
    pub fn new(tcgdex: Arc<dyn DataFetcher>) -> Self {
        Self { tcgdex }
    }
}

impl Step for EnrichTcgStep {
    fn name(&self) -> &str {
        "EnrichTcg"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let languages = languages_param(params)?;
        let fetcher = CachedFetcher::new(Arc::clone(&self.tcgdex), params.require_path("cache_dir")?)
            .with_force(params.bool_or("force", false)?);

        let mut enriched = 0;
        let mut skipped = 0;

        let cards = context.for_each_card(params.step(), |section, card| {
            let (Some(set), Some(number)) =
                (as_text(card.get(keys::SET)), as_text(card.get(keys::NUMBER)))
            else {
                skipped += 1;
                return Ok(());
            };

            let mut by_lang = card
                .get(keys::TCG)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            for lang in &languages {
                let resource = format!("{}/cards/{}-{}", lang, set, number);
                match fetcher.fetch(&resource)? {
                    Some(remote) => {
                        by_lang.insert(lang.clone(), Value::Object(card_record(&remote)));
                    }
                    None => debug!("[{}] {} has no {} printing", section, resource, lang),
                }
            }

            if by_lang.is_empty() {
                skipped += 1;
            } else {
                card.insert(keys::TCG.to_string(), Value::Object(by_lang));
                enriched += 1;
            }
            Ok(())
        })?;

        info!("TCG data: {} enriched, {} skipped of {} cards", enriched, skipped, cards);
        context.record(
            params.step(),
            json!({ "cards": cards, "enriched": enriched, "skipped": skipped }),
        );
        Ok(context)
    }
}

/// The subset of a TCGdex card the binder keeps
pub fn card_record(remote: &Value) -> Map<String, Value> {
    let mut record = Map::new();
    for field in ["name", "image", "rarity", "illustrator"] {
        if let Some(value) = remote.get(field).filter(|v| !v.is_null()) {
            record.insert(field.to_string(), value.clone());
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_record_keeps_known_fields() {
        let remote = json!({
            "id": "base1-44",
            "name": "Bulbasaur",
            "image": "https://assets.tcgdex.net/en/base/base1/44",
            "rarity": "Common",
            "illustrator": null,
            "attacks": []
        });
        let record = card_record(&remote);
        assert_eq!(
            Value::Object(record),
            json!({
                "name": "Bulbasaur",
                "image": "https://assets.tcgdex.net/en/base/base1/44",
                "rarity": "Common"
            })
        );
    }
}
