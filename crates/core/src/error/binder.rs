/// Unified error type for binder pipelines
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderError {
    // Pipeline configuration errors
    #[error("Pipeline has no steps")]
    EmptyPipeline,

    #[error("Step #{position} has no 'step' name")]
    MissingStepName { position: usize },

    #[error("Step #{position}: unknown step '{name}'")]
    UnknownStep { position: usize, name: String },

    #[error("Unknown step '{0}'")]
    NotRegistered(String),

    #[error("Step '{step}' is missing required param '{param}'")]
    MissingParam { step: String, param: String },

    #[error("Step '{step}' has invalid param '{param}': {reason}")]
    InvalidParam {
        step: String,
        param: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot access {}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}", path.display())]
    FileJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Upstream API errors
    #[error("HTTP error: {0}")]
    Http(String),

    // Data did not have the shape a step requires
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),

    #[error("Render error: {0}")]
    Render(String),

    // Generic error for compatibility
    #[error("{0}")]
    Other(String),

    // Boxed error for dynamic error types
    #[error("Error: {0}")]
    Boxed(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias using BinderError
pub type Result<T> = std::result::Result<T, BinderError>;

impl BinderError {
    /// Create a missing param error
    pub fn missing_param(step: impl Into<String>, param: impl Into<String>) -> Self {
        Self::MissingParam {
            step: step.into(),
            param: param.into(),
        }
    }

    /// Create an invalid param error
    pub fn invalid_param(
        step: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParam {
            step: step.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a file I/O error naming the path
    pub fn file_io(path: &Path, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a JSON parse error naming the path
    pub fn file_json(path: &Path, source: serde_json::Error) -> Self {
        Self::FileJson {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an unexpected shape error
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::UnexpectedShape(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Configuration errors call for fixing the pipeline definition,
    /// everything else is a runtime failure inside a step.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::EmptyPipeline
                | Self::MissingStepName { .. }
                | Self::UnknownStep { .. }
                | Self::NotRegistered(_)
                | Self::MissingParam { .. }
                | Self::InvalidParam { .. }
                | Self::InvalidConfig(_)
        )
    }

    /// Every underlying cause, one `caused by:` line each
    pub fn source_chain(&self) -> String {
        let mut chain = String::new();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            chain.push_str("\n  caused by: ");
            chain.push_str(&cause.to_string());
            current = cause.source();
        }
        chain
    }
}

// Conversion from String for convenience
impl From<String> for BinderError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}

// Conversion from &str for convenience
impl From<&str> for BinderError {
    fn from(msg: &str) -> Self {
        Self::Other(msg.to_string())
    }
}
