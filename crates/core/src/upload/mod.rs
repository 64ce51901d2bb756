//! Upload URL and preview URL issuance.
//!
//! This module provides:
//! - The keyed, bounded in-memory upload record store
//! - Presigned upload URL generation
//! - Preview URL construction for previously issued file IDs

mod error;
mod registry;
mod service;

pub use error::UploadError;
pub use registry::{UploadRecord, UploadRegistry};
pub use service::{UploadService, UploadTicket};
