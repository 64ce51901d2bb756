//! Upload error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Upload and preview URL issuance errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No filename was supplied.
    #[error("Filename is required")]
    MissingFilename,

    /// No file ID was supplied.
    #[error("File ID is required")]
    MissingFileId,

    /// The file ID was never issued, or its record expired.
    #[error("File not found")]
    NotFound(String),

    /// Presigning the upload URL failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
