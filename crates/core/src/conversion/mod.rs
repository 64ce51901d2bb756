//! Office-to-PDF conversion.
//!
//! The conversion itself is delegated to LibreOffice running headless. The
//! [`DocumentConverter`] trait is the seam between orchestration and the
//! external process so the preview flow can be exercised without it.

mod error;
mod filter;
mod libreoffice;

pub use error::ConversionError;
pub use filter::ExportFilter;
pub use libreoffice::LibreOfficeConverter;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// External document-to-PDF converter.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Whether `filename` has an extension this converter accepts.
    fn can_convert(&self, filename: &str) -> bool;

    /// Convert the file at `input` using `filter`, returning the output path.
    ///
    /// The output is written next to `input`.
    async fn convert(&self, input: &Path, filter: &ExportFilter)
    -> Result<PathBuf, ConversionError>;
}
