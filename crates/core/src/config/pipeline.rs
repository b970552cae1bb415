/// Pipeline definition loaded from a JSON file
use crate::error::{BinderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One row of the pipeline definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepConfig {
    /// Registry key. Optional here so the engine can report its absence by position.
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl StepConfig {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            step: Some(step.into()),
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Ordered step list plus the initial context seed.
/// Unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub steps: Vec<StepConfig>,
    #[serde(default)]
    pub save_final_output: bool,
    #[serde(default)]
    pub target_file: Option<PathBuf>,
    #[serde(default)]
    pub source_file: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(steps: Vec<StepConfig>) -> Self {
        Self {
            steps,
            ..Default::default()
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

    pub fn with_save_final_output(mut self, save: bool) -> Self {
        self.save_final_output = save;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BinderError::invalid_config(format!("Malformed pipeline config: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading pipeline config from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
