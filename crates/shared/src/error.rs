//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Only `Validation` and `NotFound` carry a distinct status; every other
/// failure surfaces to callers as a generic 500.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Unknown identifier or missing object.
    #[error("{0}")]
    NotFound(String),

    /// File extension outside the convertible allow-list.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The external converter failed.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Object storage is unreachable or refused the operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::UnsupportedFormat(_)
            | Self::Conversion(_)
            | Self::Storage(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Conversion(_) => "CONVERSION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
