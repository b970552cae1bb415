/// File-backed species name -> national dex id lookup
use binder_core::error::{BinderError, Result};
use binder_core::util::file::{read_json, write_json};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Case-insensitive name index. A miss is "no match", never an error.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: IndexMap<String, u32>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, id: u32) {
        self.entries.insert(normalize(name), id);
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(&normalize(name)).copied()
    }

    /// Resolve a card's `pokemon` reference: a dex number or a species name
    pub fn resolve(&self, reference: &Value) -> Option<u32> {
        match reference {
            Value::Number(n) => n.as_u64().and_then(|id| u32::try_from(id).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok().or_else(|| self.get(s)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw: IndexMap<String, u32> = read_json(path)?;
        let mut index = Self::new();
        for (name, id) in raw {
            index.insert(&name, id);
        }
        debug!("Loaded {} names from {:?}", index.len(), path);
        Ok(index)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, &self.entries)
    }

    /// Build from a PokeAPI list response: `{"results": [{"name", "url": ".../25/"}]}`
    pub fn from_species_list(list: &Value) -> Result<Self> {
        let results = list
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| BinderError::shape("species list has no 'results' array"))?;

        let mut index = Self::new();
        for entry in results {
            let name = entry.get("name").and_then(Value::as_str);
            let id = entry
                .get("url")
                .and_then(Value::as_str)
                .and_then(id_from_url);
            match (name, id) {
                (Some(name), Some(id)) => index.insert(name, id),
                _ => debug!("Skipping malformed species entry: {}", entry),
            }
        }
        Ok(index)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trailing numeric path segment of a PokeAPI resource URL
fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut index = NameIndex::new();
        index.insert("Mr-Mime", 122);
        assert_eq!(index.get("mr-mime"), Some(122));
        assert_eq!(index.get(" MR-MIME "), Some(122));
        assert_eq!(index.get("mime-jr"), None);
    }

    #[test]
    fn test_resolve_reference() {
        let mut index = NameIndex::new();
        index.insert("pikachu", 25);
        assert_eq!(index.resolve(&json!("Pikachu")), Some(25));
        assert_eq!(index.resolve(&json!("133")), Some(133));
        assert_eq!(index.resolve(&json!(4)), Some(4));
        assert_eq!(index.resolve(&json!("agumon")), None);
        assert_eq!(index.resolve(&json!(null)), None);
    }

    #[test]
    fn test_from_species_list() {
        let list = json!({
            "count": 3,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon-species/2/"},
                {"name": "broken"}
            ]
        });
        let index = NameIndex::from_species_list(&list).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("ivysaur"), Some(2));
        assert!(NameIndex::from_species_list(&json!({})).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index/species.json");
        let mut index = NameIndex::new();
        index.insert("Charmander", 4);
        index.save(&path).unwrap();

        let loaded = NameIndex::load(&path).unwrap();
        assert_eq!(loaded.get("charmander"), Some(4));
    }
}
