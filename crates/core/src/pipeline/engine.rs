// Pipeline engine - sequential, fail-fast step execution

use super::context::PipelineContext;
use super::core::StepParams;
use super::registry::StepRegistry;
use crate::config::PipelineConfig;
use crate::error::{BinderError, Result};
use crate::util::file::write_json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Drives a configured step list against one context
pub struct PipelineEngine {
    registry: Arc<StepRegistry>,
}

impl PipelineEngine {
    pub fn new(registry: Arc<StepRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Run the pipeline and report success. Failures are logged, never returned.
    pub fn execute(&self, config: &PipelineConfig) -> bool {
        match self.run(config) {
            Ok(_) => true,
            Err(err) => {
                log_failure(&err);
                false
            }
        }
    }

    /// Run the pipeline, returning the final context on success.
    ///
    /// Steps run in configuration order. The first error aborts the run and the
    /// in-flight context is dropped; outputs already written by earlier steps stay.
    pub fn run(&self, config: &PipelineConfig) -> Result<PipelineContext> {
        if config.steps.is_empty() {
            return Err(BinderError::EmptyPipeline);
        }

        let total = config.steps.len();
        info!("Running pipeline with {} steps", total);
        let started = Instant::now();

        let mut context = PipelineContext::new();
        context.target_file = config.target_file.clone();
        context.source_file = config.source_file.clone();

        for (index, entry) in config.steps.iter().enumerate() {
            let position = index + 1;

            let name = entry
                .step
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or(BinderError::MissingStepName { position })?;

            let step = self
                .registry
                .create(name)
                .ok_or_else(|| BinderError::UnknownStep {
                    position,
                    name: name.to_string(),
                })?;

            info!("[{}/{}] {}", position, total, name);
            let step_started = Instant::now();
            let params = StepParams::new(name, entry.params.clone());

            context = match step.execute(context, &params) {
                Ok(next) => next,
                Err(err) => {
                    log_step_failure(position, name, &err);
                    return Err(err);
                }
            };

            debug!(
                "Step '{}' ({}) finished in {:?}",
                name,
                step.name(),
                step_started.elapsed()
            );
        }

        if config.save_final_output {
            if let Err(err) = self.save_final_output(&context) {
                error!("Failed to write final output: {}", err);
                return Err(err);
            }
        }

        info!("Pipeline finished in {:?}", started.elapsed());
        Ok(context)
    }

    fn save_final_output(&self, context: &PipelineContext) -> Result<()> {
        match &context.target_file {
            Some(path) if context.has_data() => {
                write_json(path, &context.data)?;
                info!("Final output written to {}", path.display());
            }
            Some(_) => debug!("No data to save, skipping final output"),
            None => debug!("No target file set, skipping final output"),
        }
        Ok(())
    }
}

/// Configuration failures get one terse line, runtime failures the full cause chain.
fn log_step_failure(position: usize, name: &str, err: &BinderError) {
    if err.is_config() {
        error!("Step #{} '{}' misconfigured: {}", position, name, err);
    } else {
        error!(
            "Step #{} '{}' failed: {}{}",
            position,
            name,
            err,
            err.source_chain()
        );
        debug!("Step #{} '{}' error detail: {:?}", position, name, err);
    }
}

fn log_failure(err: &BinderError) {
    // Step errors are logged with their position where they happen.
    match err {
        BinderError::EmptyPipeline
        | BinderError::MissingStepName { .. }
        | BinderError::UnknownStep { .. } => error!("{}", err),
        _ => debug!("Pipeline aborted: {:?}", err),
    }
}
