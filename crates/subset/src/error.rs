//! Error types for subset generation and the upload pipeline.

use thiserror::Error;

/// External subsetting tool failure.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool ran and exited non-zero. The combined stdout/stderr is
    /// kept for operator logs and never surfaced to clients.
    #[error("subsetting tool exited with {status}")]
    Failed {
        status: std::process::ExitStatus,
        output: String,
    },

    /// The tool could not be invoked at all.
    #[error("failed to invoke subsetting tool: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Classified upload pipeline failure.
///
/// One of these terminates a pipeline run; no state is retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] glyphpress_core::Error),

    #[error("no subsets requested")]
    NoSubsets,

    #[error("destination escapes the upload root: {0:?}")]
    RootEscape(String),

    #[error("subset generation failed for {subset_id}")]
    Generation {
        subset_id: String,
        #[source]
        source: ToolError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
