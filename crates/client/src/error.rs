//! Client error types.

use thiserror::Error;

use crate::state::FlowState;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by the client flow.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Selected file is not an office document.
    #[error("invalid file type")]
    InvalidFileType,

    /// The action is not available in the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// Attempted action.
        action: &'static str,
        /// State the flow was in.
        state: FlowState,
    },

    /// The API answered with a failure envelope or an error status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message reported by the server.
        message: String,
    },

    /// The presigned upload was refused by the object store.
    #[error("upload rejected with status {0}")]
    UploadRejected(u16),

    /// Transport or decoding failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
