pub mod constants;
pub mod pipeline;

pub use pipeline::{PipelineConfig, StepConfig};
