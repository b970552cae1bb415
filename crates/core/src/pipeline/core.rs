// Pipeline core - step contract and params

use super::context::PipelineContext;
use crate::error::{BinderError, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Pipeline step trait
///
/// A step takes ownership of the context, transforms it and hands it back.
/// Side effects (files, network) are allowed but must be safe to re-run:
/// the engine never retries or rolls back.
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    fn execute(&self, context: PipelineContext, params: &StepParams) -> Result<PipelineContext>;
}

/// Free-form params of one configured step, with typed accessors.
///
/// Every accessor failure is a configuration error naming the step and the param.
#[derive(Debug, Clone, Default)]
pub struct StepParams {
    step: String,
    values: Map<String, Value>,
}

impl StepParams {
    pub fn new(step: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            step: step.into(),
            values,
        }
    }

    /// Empty params for a step, mostly useful in tests
    pub fn empty(step: impl Into<String>) -> Self {
        Self::new(step, Map::new())
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(key, format!("expected a string, got {}", other))),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.str(key)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BinderError::missing_param(&self.step, key))
    }

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str> {
        Ok(self.str(key)?.unwrap_or(default))
    }

    pub fn path(&self, key: &str) -> Result<Option<PathBuf>> {
        Ok(self.str(key)?.filter(|s| !s.is_empty()).map(PathBuf::from))
    }

    pub fn require_path(&self, key: &str) -> Result<PathBuf> {
        self.require_str(key).map(PathBuf::from)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(key, format!("expected a boolean, got {}", other))),
        }
    }

    pub fn u64_or(&self, key: &str, default: u64) -> Result<u64> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.as_u64().ok_or_else(|| {
                self.invalid(key, format!("expected a non-negative integer, got {}", value))
            }),
        }
    }

    /// A list of strings; a single string is accepted as a one-element list
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| self.invalid(key, format!("non-string entry {}", item)))
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(self.invalid(key, format!("expected a list of strings, got {}", other))),
        }
    }

    fn invalid(&self, key: &str, reason: String) -> BinderError {
        BinderError::invalid_param(&self.step, key, reason)
    }
}
