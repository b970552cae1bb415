use super::languages_param;
use binder_core::config::constants;
use binder_core::error::{BinderError, Result};
use binder_core::pipeline::{PipelineContext, Step, StepParams, keys};
use binder_core::util::json::{as_text, localize};
use binder_core::util::sort::{CardOrder, sort_cards};
use serde_json::{Map, Value, json};
use tracing::{debug, info};

/// Normalize enriched sections into the canonical binder format
pub struct TransformSectionsStep;

/// Per-run settings resolved from params
struct Transform {
    languages: Vec<String>,
    default_language: String,
    image_quality: String,
}

impl Step for TransformSectionsStep {
    fn name(&self) -> &str {
        "TransformSections"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let sort_by = params.str_or("sort_by", "source")?;
        let order = CardOrder::parse(sort_by).ok_or_else(|| {
            BinderError::invalid_param(
                params.step(),
                "sort_by",
                format!("unknown order '{}', expected source, number or id", sort_by),
            )
        })?;
        let transform = Transform {
            languages: languages_param(params)?,
            default_language: params
                .str_or("default_language", constants::DEFAULT_LANGUAGE)?
                .to_string(),
            image_quality: params.str_or("image_quality", "high")?.to_string(),
        };

        let sections = context.sections_mut(params.step())?;
        let mut section_count = 0;
        let mut card_count = 0;

        for (key, section) in sections.iter_mut() {
            let Some(section) = section.as_object_mut() else {
                return Err(BinderError::shape(format!("section '{}' is not an object", key)));
            };
            card_count += transform.section(key, section, order);
            section_count += 1;
        }

        info!(
            "Transformed {} sections with {} cards ({} languages)",
            section_count,
            card_count,
            transform.languages.len()
        );
        context.record(
            params.step(),
            json!({
                "sections": section_count,
                "cards": card_count,
                "languages": transform.languages
            }),
        );
        Ok(context)
    }
}

impl Transform {
    fn section(&self, key: &str, section: &mut Map<String, Value>, order: CardOrder) -> usize {
        let mut title = self.localize(section.get(keys::TITLE));
        if title.is_empty() {
            title = self.localize(Some(&Value::String(key.to_string())));
        }
        section.insert(keys::TITLE.to_string(), Value::Object(title));

        let description = self.localize(section.get(keys::DESCRIPTION));
        if description.is_empty() {
            section.remove(keys::DESCRIPTION);
        } else {
            section.insert(keys::DESCRIPTION.to_string(), Value::Object(description));
        }

        let Some(cards) = section.get_mut(keys::CARDS).and_then(Value::as_array_mut) else {
            debug!("Section '{}' has no cards", key);
            return 0;
        };
        for card in cards.iter_mut().filter_map(Value::as_object_mut) {
            self.card(card);
        }
        sort_cards(cards, order);
        cards.len()
    }

    /// Rewrite one card in place; re-running on an already transformed card is a no-op
    fn card(&self, card: &mut Map<String, Value>) {
        let tcg = card
            .remove(keys::TCG)
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();
        let names = card.remove(keys::NAMES);

        let mut name = self.localize(names.as_ref());
        if name.is_empty() {
            let tcg_names: Map<String, Value> = tcg
                .iter()
                .filter_map(|(lang, record)| {
                    record.get(keys::NAME).map(|name| (lang.clone(), name.clone()))
                })
                .collect();
            name = self.localize(Some(&Value::Object(tcg_names)));
        }
        if name.is_empty() {
            name = self.localize(card.get(keys::NAME));
        }
        if name.is_empty() {
            if let Some(pokemon) = as_text(card.get(keys::POKEMON)) {
                name = self.localize(Some(&Value::String(pokemon)));
            }
        }
        if !name.is_empty() {
            card.insert(keys::NAME.to_string(), Value::Object(name));
        }

        let preferred = tcg
            .get(&self.default_language)
            .into_iter()
            .chain(tcg.values());
        for record in preferred {
            if !card.contains_key(keys::IMAGE) {
                if let Some(base) = record.get(keys::IMAGE).and_then(Value::as_str) {
                    card.insert(
                        keys::IMAGE.to_string(),
                        json!(format!("{}/{}.png", base.trim_end_matches('/'), self.image_quality)),
                    );
                }
            }
            for field in ["rarity", "illustrator"] {
                if !card.contains_key(field) {
                    if let Some(value) = record.get(field) {
                        card.insert(field.to_string(), value.clone());
                    }
                }
            }
        }
    }

    fn localize(&self, value: Option<&Value>) -> Map<String, Value> {
        localize(value, &self.languages, &self.default_language)
    }
}
