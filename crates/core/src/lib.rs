pub mod config;
pub mod error;
pub mod pipeline;
pub mod util;

pub use error::{BinderError, Result};
pub use pipeline::{PipelineContext, PipelineEngine, Step, StepParams, StepRegistry};
