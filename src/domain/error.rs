use std::io;

use thiserror::Error;

/// Library-wide error type for wfm operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// External tool invocation failed.
    #[error("{tool} invocation failed: {details}")]
    ExternalTool { tool: String, details: String },

    /// External tool call exceeded its per-call deadline.
    #[error("'{command}' did not finish within {seconds}s")]
    CommandTimeout { command: String, seconds: u64 },

    /// Git execution failed.
    #[error("Git error running '{command}': {details}")]
    GitError { command: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// No persisted run id to resume from.
    #[error("No saved run id found. Trigger a workflow first or pass a run id.")]
    RunPointerMissing,

    /// Persisted run id is not a number.
    #[error("Saved run id is not a valid number: '{0}'")]
    InvalidRunPointer(String),
}
