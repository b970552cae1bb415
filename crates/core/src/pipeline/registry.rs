// Pipeline step registry for name-based step resolution
use super::core::Step;
use crate::error::{BinderError, Result};
use std::collections::HashMap;
use tracing::debug;

/// Factory function type for creating pipeline steps
pub type StepFactory = Box<dyn Fn() -> Box<dyn Step> + Send + Sync>;

/// Registry for pipeline steps
pub struct StepRegistry {
    steps: HashMap<String, StepFactory>,
}

impl StepRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            steps: HashMap::new(),
        }
    }

    /// Register a step factory with a name.
    /// A later registration under the same name replaces the earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Step> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.steps.contains_key(&name) {
            debug!("Step '{}' re-registered, previous implementation replaced", name);
        }
        self.steps.insert(name, Box::new(factory));
    }

    /// Create a step instance by name
    pub fn get(&self, name: &str) -> Result<Box<dyn Step>> {
        self.create(name)
            .ok_or_else(|| BinderError::NotRegistered(name.to_string()))
    }

    /// Create a step instance by name, `None` if unregistered
    pub fn create(&self, name: &str) -> Option<Box<dyn Step>> {
        self.steps.get(name).map(|factory| factory())
    }

    /// Check if a step is registered
    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// List all registered step names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.steps.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}
