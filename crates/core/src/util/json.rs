//! Helpers over the schema-less data tree

use serde_json::{Map, Value};

/// Apply `patch` onto `base` with JSON merge-patch semantics:
/// objects merge recursively, `null` removes a key, anything else replaces.
pub fn merge_patch(base: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *base = patch.clone();
        return;
    };
    if !base.is_object() {
        *base = Value::Object(Map::new());
    }
    let Value::Object(base_map) = base else {
        return;
    };
    for (key, value) in patch_map {
        if value.is_null() {
            base_map.remove(key);
        } else {
            merge_patch(base_map.entry(key.clone()).or_insert(Value::Null), value);
        }
    }
}

/// Expand a possibly-localized value into one string per language.
///
/// A plain string applies to every language. For a language map, missing
/// languages fall back to `default_language`, then to the first non-empty entry.
pub fn localize(value: Option<&Value>, languages: &[String], default_language: &str) -> Map<String, Value> {
    let mut out = Map::new();
    match value {
        Some(Value::String(s)) => {
            for lang in languages {
                out.insert(lang.clone(), Value::String(s.clone()));
            }
        }
        Some(Value::Object(by_lang)) => {
            let fallback = non_empty_str(by_lang.get(default_language))
                .or_else(|| by_lang.values().find_map(|v| non_empty_str(Some(v))));
            for lang in languages {
                let text = non_empty_str(by_lang.get(lang)).or(fallback);
                if let Some(text) = text {
                    out.insert(lang.clone(), Value::String(text.to_string()));
                }
            }
        }
        _ => {}
    }
    out
}

/// Pick one language out of a language map, falling back like [`localize`]
pub fn pick_language<'a>(by_lang: Option<&'a Value>, language: &str, default_language: &str) -> Option<&'a str> {
    match by_lang? {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => non_empty_str(map.get(language))
            .or_else(|| non_empty_str(map.get(default_language)))
            .or_else(|| map.values().find_map(|v| non_empty_str(Some(v)))),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Read a card field that may be stored as a string or a number
pub fn as_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
