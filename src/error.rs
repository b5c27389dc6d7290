use thiserror::Error;

/// Rejections raised by the transcription workflow.
///
/// Every variant is local and recoverable: the operation that produced it
/// left the workflow state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("step {step} is out of range (guide has {step_count} steps)")]
    OutOfRange { step: usize, step_count: usize },

    #[error("transcription has not started; confirm a region first")]
    NotStarted,

    #[error("cannot submit an empty value for step {step}")]
    EmptyValue { step: usize },

    #[error("guide must contain at least one step")]
    EmptyGuide,
}

#[derive(Debug, Error)]
pub enum TranscriberError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
