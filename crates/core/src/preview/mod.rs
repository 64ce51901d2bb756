//! Conversion endpoint orchestration.
//!
//! Given a source object key, serve the cached PDF if one exists, otherwise
//! download the source, convert it, store the PDF and serve that. Concurrent
//! requests for the same key share one conversion.

mod error;
mod service;

pub use error::PreviewError;
pub use service::{PDF_CONTENT_TYPE, PreviewOptions, PreviewPayload, PreviewService};

/// Route of the conversion endpoint, relative to the public base URL.
pub const CONVERT_PATH: &str = "/convert";
