// Pipeline context - the payload threaded through every step

use super::keys;
use crate::error::{BinderError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;

/// Mutable carrier of in-flight data, moved from one step to the next
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Evolving payload, no fixed schema
    pub data: Value,
    /// Per-step records keyed by step identifier, in insertion order
    metadata: IndexMap<String, Value>,
    pub target_file: Option<PathBuf>,
    pub source_file: Option<PathBuf>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self {
            data: Value::Object(Map::new()),
            metadata: IndexMap::new(),
            target_file: None,
            source_file: None,
        }
    }

    pub fn with_target_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_file = Some(path.into());
        self
    }

    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Append a step's result and return the key it was stored under.
    ///
    /// Records are never replaced. A step name that already has a record
    /// gets the next free `name#N` key, starting at `#2`.
    pub fn record(&mut self, step_id: impl Into<String>, value: Value) -> String {
        let step_id = step_id.into();
        let key = if self.metadata.contains_key(&step_id) {
            let key = (2..)
                .map(|n| format!("{}#{}", step_id, n))
                .find(|candidate| !self.metadata.contains_key(candidate))
                .unwrap_or_default();
            debug!("Step '{}' already recorded, appending as '{}'", step_id, key);
            key
        } else {
            step_id
        };
        self.metadata.insert(key.clone(), value);
        key
    }

    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    pub fn metadata_for(&self, step_id: &str) -> Option<&Value> {
        self.metadata.get(step_id)
    }

    /// True when there is nothing worth persisting
    pub fn has_data(&self) -> bool {
        match &self.data {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The `sections` mapping, or an error naming the step that needed it
    pub fn sections(&self, step: &str) -> Result<&Map<String, Value>> {
        self.data
            .get(keys::SECTIONS)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                BinderError::shape(format!(
                    "step '{}' requires a '{}' object in the pipeline data",
                    step,
                    keys::SECTIONS
                ))
            })
    }

    pub fn sections_mut(&mut self, step: &str) -> Result<&mut Map<String, Value>> {
        self.data
            .get_mut(keys::SECTIONS)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                BinderError::shape(format!(
                    "step '{}' requires a '{}' object in the pipeline data",
                    step,
                    keys::SECTIONS
                ))
            })
    }

    /// Visit every card object of every section, in order.
    /// Sections without a `cards` array are skipped.
    pub fn for_each_card<F>(&mut self, step: &str, mut visit: F) -> Result<usize>
    where
        F: FnMut(&str, &mut Map<String, Value>) -> Result<()>,
    {
        let mut visited = 0;
        for (section_key, section) in self.sections_mut(step)?.iter_mut() {
            let Some(cards) = section.get_mut(keys::CARDS).and_then(Value::as_array_mut) else {
                debug!("Section '{}' has no cards, skipping", section_key);
                continue;
            };
            for card in cards.iter_mut().filter_map(Value::as_object_mut) {
                visit(section_key, card)?;
                visited += 1;
            }
        }
        Ok(visited)
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}
