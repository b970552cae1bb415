//! Page layout shared by every renderer: which card lands in which slot

use super::{RenderOptions, RenderSummary};
use binder_core::error::{BinderError, Result};
use binder_core::pipeline::keys;
use binder_core::util::json::{as_text, pick_language};
use serde_json::{Map, Value};
use tracing::debug;

/// Title block printed on the first page of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub title: String,
    pub description: Option<String>,
}

/// One filled slot of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSlot {
    pub name: String,
    pub number: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderPage {
    /// 1-based, counted across the whole document
    pub number: usize,
    pub header: Option<PageHeader>,
    pub slots: Vec<CardSlot>,
}

/// Split every section into grid-sized pages.
/// A section without cards still gets one page for its header.
pub fn paginate(sections: &Map<String, Value>, options: &RenderOptions) -> Result<Vec<BinderPage>> {
    let per_page = options.cards_per_page()?;
    let mut pages = Vec::new();

    for (key, section) in sections {
        let section = section
            .as_object()
            .ok_or_else(|| BinderError::shape(format!("section '{}' is not an object", key)))?;
        let header = PageHeader {
            title: pick_language(section.get(keys::TITLE), &options.language, &options.default_language)
                .unwrap_or(key)
                .to_string(),
            description: pick_language(
                section.get(keys::DESCRIPTION),
                &options.language,
                &options.default_language,
            )
            .map(str::to_string),
        };
        let slots: Vec<CardSlot> = section
            .get(keys::CARDS)
            .and_then(Value::as_array)
            .map(|cards| {
                cards
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|card| card_slot(card, options))
                    .collect()
            })
            .unwrap_or_default();

        let before = pages.len();
        let mut header = Some(header);
        if slots.is_empty() {
            pages.push(BinderPage {
                number: pages.len() + 1,
                header: header.take(),
                slots: Vec::new(),
            });
        }
        for chunk in slots.chunks(per_page) {
            pages.push(BinderPage {
                number: pages.len() + 1,
                header: header.take(),
                slots: chunk.to_vec(),
            });
        }
        debug!("Section '{}': {} cards on {} pages", key, slots.len(), pages.len() - before);
    }
    Ok(pages)
}

pub fn summarize(pages: &[BinderPage]) -> RenderSummary {
    RenderSummary {
        pages: pages.len(),
        cards: pages.iter().map(|page| page.slots.len()).sum(),
    }
}

fn card_slot(card: &Map<String, Value>, options: &RenderOptions) -> CardSlot {
    let name = pick_language(card.get(keys::NAME), &options.language, &options.default_language)
        .map(str::to_string)
        .or_else(|| as_text(card.get(keys::POKEMON)))
        .unwrap_or_default();
    let image = card
        .get(keys::IMAGE_PATH)
        .and_then(Value::as_str)
        .or_else(|| card.get(keys::IMAGE).and_then(Value::as_str))
        .map(str::to_string);
    let number = match (as_text(card.get(keys::SET)), as_text(card.get(keys::NUMBER))) {
        (Some(set), Some(number)) => Some(format!("{} #{}", set, number)),
        (None, Some(number)) => Some(format!("#{}", number)),
        _ => card.get(keys::ID).and_then(Value::as_u64).map(|id| format!("No. {:04}", id)),
    };
    CardSlot { name, number, image }
}
