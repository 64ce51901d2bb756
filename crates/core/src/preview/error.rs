//! Preview error types.

use std::sync::Arc;

use thiserror::Error;

use crate::conversion::ConversionError;
use crate::storage::StorageError;

/// Conversion endpoint failures.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// No object key was supplied.
    #[error("Object key is required")]
    MissingKey,

    /// The source object does not exist.
    #[error("file {0} not found")]
    SourceNotFound(String),

    /// The source object exists but has no content.
    #[error("file {0} has no retrievable content")]
    EmptySource(String),

    /// Extension outside the allow-list.
    #[error("file {0} cannot be converted to PDF")]
    Unsupported(String),

    /// The converter failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Object storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Failure of a conversion this request was waiting on.
    #[error(transparent)]
    Shared(Arc<PreviewError>),
}

impl PreviewError {
    /// The underlying error, looking through shared in-flight failures.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Shared(inner) => inner.root(),
            other => other,
        }
    }
}
