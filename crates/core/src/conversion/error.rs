//! Conversion error types.

use thiserror::Error;

/// Conversion failures.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Converter binary could not be started.
    #[error("failed to launch converter: {0}")]
    Launch(#[source] std::io::Error),

    /// Converter ran but exited unsuccessfully.
    #[error("converter exited with {status}: {stderr}")]
    Failed {
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// Converter did not finish within the configured limit.
    #[error("conversion timed out after {0} seconds")]
    TimedOut(u64),

    /// Converter reported success but produced no PDF.
    #[error("converter produced no output at {0}")]
    MissingOutput(String),

    /// Scratch file handling failed.
    #[error("scratch file error: {0}")]
    Io(#[from] std::io::Error),
}
