use binder_core::error::{BinderError, Result};
use binder_core::pipeline::{PipelineContext, Step, StepParams};
use binder_core::util::file::read_json;
use serde_json::{Value, json};
use tracing::info;

/// Load the source document into the pipeline data
pub struct LoadSourceStep;

impl Step for LoadSourceStep {
    fn name(&self) -> &str {
        "LoadSource"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let file = match params.path("file")? {
            Some(file) => file,
            None => context
                .source_file
                .clone()
                .ok_or_else(|| BinderError::missing_param(params.step(), "file"))?,
        };

        let value: Value = read_json(&file)?;
        if !value.is_object() {
            return Err(BinderError::shape(format!(
                "source {} must contain a JSON object",
                file.display()
            )));
        }

        let sections = value
            .get(binder_core::pipeline::keys::SECTIONS)
            .and_then(Value::as_object)
            .map_or(0, |s| s.len());
        info!("Loaded {} sections from {}", sections, file.display());

        context.data = value;
        context.record(
            params.step(),
            json!({ "file": file.display().to_string(), "sections": sections }),
        );
        Ok(context)
    }
}
