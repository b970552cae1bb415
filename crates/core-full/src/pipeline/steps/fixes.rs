use binder_core::error::{BinderError, Result};
use binder_core::pipeline::{PipelineContext, Step, StepParams, keys};
use binder_core::util::file::read_json;
use binder_core::util::json::{as_text, merge_patch};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

/// Apply manual corrections from a fixes file.
///
/// The file maps section keys to merge patches (optionally under a top-level
/// `sections` key). Inside a section patch, `cards` may be an object keyed by
/// pokemon name (case-insensitive) or card index, each value patching that card.
pub struct ApplyFixesStep;

#[derive(Default)]
struct FixCounts {
    sections: usize,
    cards: usize,
    unmatched: usize,
}

impl Step for ApplyFixesStep {
    fn name(&self) -> &str {
        "ApplyFixes"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let file = params.require_path("file")?;
        let fixes: Value = read_json(&file)?;
        let fixes = fixes
            .get(keys::SECTIONS)
            .unwrap_or(&fixes)
            .as_object()
            .ok_or_else(|| {
                BinderError::shape(format!("fixes {} must contain a JSON object", file.display()))
            })?;

        let sections = context.sections_mut(params.step())?;
        let mut counts = FixCounts::default();

        for (key, fix) in fixes {
            let Some(fix) = fix.as_object() else {
                warn!("Fix for section '{}' is not an object, ignoring", key);
                continue;
            };
            match sections.get_mut(key) {
                Some(section) => apply_section_fix(key, section, fix, &mut counts),
                None if !fix.get(keys::CARDS).is_some_and(Value::is_object) => {
                    // A fix for an unknown section adds it.
                    sections.insert(key.clone(), Value::Object(fix.clone()));
                    counts.sections += 1;
                }
                None => {
                    warn!("Fix targets unknown section '{}' with card patches, ignoring", key);
                    counts.unmatched += 1;
                }
            }
        }

        info!(
            "Applied fixes from {}: {} sections, {} cards, {} unmatched",
            file.display(),
            counts.sections,
            counts.cards,
            counts.unmatched
        );
        context.record(
            params.step(),
            json!({
                "file": file.display().to_string(),
                "sections": counts.sections,
                "cards": counts.cards,
                "unmatched": counts.unmatched
            }),
        );
        Ok(context)
    }
}

fn apply_section_fix(key: &str, section: &mut Value, fix: &Map<String, Value>, counts: &mut FixCounts) {
    let mut section_patch = fix.clone();
    let card_fixes = match section_patch.remove(keys::CARDS) {
        Some(Value::Object(card_fixes)) => Some(card_fixes),
        Some(replacement) => {
            // A list replaces the cards wholesale.
            section_patch.insert(keys::CARDS.to_string(), replacement);
            None
        }
        None => None,
    };

    merge_patch(section, &Value::Object(section_patch));
    counts.sections += 1;

    let Some(card_fixes) = card_fixes else {
        return;
    };
    let Some(cards) = section.get_mut(keys::CARDS).and_then(Value::as_array_mut) else {
        warn!("Section '{}' has no cards to fix", key);
        counts.unmatched += card_fixes.len();
        return;
    };

    for (reference, patch) in &card_fixes {
        match find_card(cards, reference) {
            Some(index) => {
                merge_patch(&mut cards[index], patch);
                counts.cards += 1;
            }
            None => {
                warn!("[{}] No card matches fix '{}'", key, reference);
                counts.unmatched += 1;
            }
        }
    }
}

/// Card position by pokemon name (case-insensitive), falling back to a numeric index
fn find_card(cards: &[Value], reference: &str) -> Option<usize> {
    let wanted = reference.trim().to_lowercase();
    cards
        .iter()
        .position(|card| {
            as_text(card.get(keys::POKEMON)).is_some_and(|name| name.to_lowercase() == wanted)
        })
        .or_else(|| wanted.parse::<usize>().ok().filter(|index| *index < cards.len()))
}
