//! Natural ordering for card numbers

use crate::pipeline::keys;
use crate::util::json::as_text;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Card ordering supported by `transform_sections`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOrder {
    /// Keep source order
    Source,
    /// Set id, then card number, both in natural order ("2" < "10" < "TG01")
    Number,
    /// National dex id, cards without one last
    Id,
}

impl CardOrder {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "source" | "none" => Some(Self::Source),
            "number" => Some(Self::Number),
            "id" => Some(Self::Id),
            _ => None,
        }
    }
}

/// Compare two cards by set then number using natural ordering
pub fn compare_by_number(a: &Map<String, Value>, b: &Map<String, Value>) -> Ordering {
    let a_set = as_text(a.get(keys::SET)).unwrap_or_default();
    let b_set = as_text(b.get(keys::SET)).unwrap_or_default();
    natord::compare(&a_set, &b_set).then_with(|| {
        let a_num = as_text(a.get(keys::NUMBER)).unwrap_or_default();
        let b_num = as_text(b.get(keys::NUMBER)).unwrap_or_default();
        natord::compare(&a_num, &b_num)
    })
}

/// Compare two cards by dex id; cards without an id sort after all others
pub fn compare_by_id(a: &Map<String, Value>, b: &Map<String, Value>) -> Ordering {
    let a_id = a.get(keys::ID).and_then(Value::as_u64);
    let b_id = b.get(keys::ID).and_then(Value::as_u64);
    match (a_id, b_id) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of a card list
pub fn sort_cards(cards: &mut [Value], order: CardOrder) {
    let empty = Map::new();
    let compare: fn(&Map<String, Value>, &Map<String, Value>) -> Ordering = match order {
        CardOrder::Source => return,
        CardOrder::Number => compare_by_number,
        CardOrder::Id => compare_by_id,
    };
    cards.sort_by(|a, b| {
        compare(
            a.as_object().unwrap_or(&empty),
            b.as_object().unwrap_or(&empty),
        )
    });
}
