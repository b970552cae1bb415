// Pipeline module for I/O-backed steps

pub mod register;
pub mod steps;

// Re-export commonly used types from core
pub use binder_core::pipeline::{PipelineContext, PipelineEngine, Step, StepParams, StepRegistry};

// Re-export steps
pub use steps::*;

// Re-export registration
pub use register::{StepServices, register_steps};
