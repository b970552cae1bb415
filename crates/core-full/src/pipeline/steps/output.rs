use binder_core::error::{BinderError, Result};
use binder_core::pipeline::{PipelineContext, Step, StepParams};
use binder_core::util::file::write_json;
use serde_json::json;
use tracing::info;

/// Persist the current data tree as indented JSON
pub struct SaveOutputStep;

impl Step for SaveOutputStep {
    fn name(&self) -> &str {
        "SaveOutput"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let file = match params.path("file")? {
            Some(file) => file,
            None => context
                .target_file
                .clone()
                .ok_or_else(|| BinderError::missing_param(params.step(), "file"))?,
        };

        write_json(&file, &context.data)?;
        info!("Saved data to {}", file.display());

        context.record(params.step(), json!({ "file": file.display().to_string() }));
        Ok(context)
    }
}
