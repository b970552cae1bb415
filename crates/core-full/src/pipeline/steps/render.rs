use crate::render::{DocumentRenderer, RenderFormat, RenderOptions};
use binder_core::config::constants;
use binder_core::error::{BinderError, Result};
use binder_core::pipeline::{PipelineContext, Step, StepParams};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Render the sections as HTML or PDF, picked by `format` or the output extension
pub struct RenderBinderStep {
    html: Arc<dyn DocumentRenderer>,
    pdf: Arc<dyn DocumentRenderer>,
}

impl RenderBinderStep {
    pub fn new(html: Arc<dyn DocumentRenderer>, pdf: Arc<dyn DocumentRenderer>) -> Self {
        Self { html, pdf }
    }

    fn options(params: &StepParams) -> Result<RenderOptions> {
        let language = params.str_or("language", constants::DEFAULT_LANGUAGE)?;
        Ok(RenderOptions {
            language: language.to_string(),
            default_language: params.str_or("default_language", language)?.to_string(),
            columns: grid_param(params, "columns", constants::DEFAULT_COLUMNS)?,
            rows: grid_param(params, "rows", constants::DEFAULT_ROWS)?,
            title: params.str("title")?.map(str::to_string),
        })
    }

    fn format(params: &StepParams, output: &Path) -> Result<RenderFormat> {
        match params.str("format")? {
            Some(name) => RenderFormat::parse(name).ok_or_else(|| {
                BinderError::invalid_param(
                    params.step(),
                    "format",
                    format!("expected 'html' or 'pdf', got '{}'", name),
                )
            }),
            None => RenderFormat::from_path(output).ok_or_else(|| {
                BinderError::invalid_param(
                    params.step(),
                    "output",
                    format!(
                        "cannot tell the format of {}, use a .html or .pdf extension or set 'format'",
                        output.display()
                    ),
                )
            }),
        }
    }

    fn renderer(&self, format: RenderFormat) -> &Arc<dyn DocumentRenderer> {
        match format {
            RenderFormat::Html => &self.html,
            RenderFormat::Pdf => &self.pdf,
        }
    }
}

fn grid_param(params: &StepParams, key: &str, default: u64) -> Result<usize> {
    let value = params.u64_or(key, default)?;
    if !(1..=constants::MAX_GRID_SIZE).contains(&value) {
        return Err(BinderError::invalid_param(
            params.step(),
            key,
            format!(
                "must be between 1 and {}, got {}",
                constants::MAX_GRID_SIZE,
                value
            ),
        ));
    }
    Ok(value as usize)
}

impl Step for RenderBinderStep {
    fn name(&self) -> &str {
        "RenderBinder"
    }

    fn execute(&self, mut context: PipelineContext, params: &StepParams) -> Result<PipelineContext> {
        let output = params.require_path("output")?;
        let options = Self::options(params)?;
        let format = Self::format(params, &output)?;

        let summary = self
            .renderer(format)
            .render(context.sections(params.step())?, &options, &output)?;

        info!(
            "Rendered {} cards on {} pages to {} ({})",
            summary.cards,
            summary.pages,
            output.display(),
            format.as_str()
        );
        context.record(
            params.step(),
            json!({
                "output": output.display().to_string(),
                "format": format.as_str(),
                "pages": summary.pages,
                "cards": summary.cards
            }),
        );
        Ok(context)
    }
}
