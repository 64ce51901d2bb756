//! Preview service implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use moka::future::Cache;
use tracing::{debug, info};

use docview_shared::config::{DeliveryMode, PreviewSettings};
use docview_shared::types::OfficeFormat;

use super::error::PreviewError;
use crate::conversion::{ConversionError, DocumentConverter, ExportFilter};
use crate::keys;
use crate::storage::{PresignedUrl, StorageError, StorageService};

/// Content type of converted artifacts.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Upper bound on simultaneously tracked in-flight conversions.
const MAX_IN_FLIGHT: u64 = 1_000;

/// Safety net for entries that are never invalidated.
const IN_FLIGHT_TTL_SECS: u64 = 600;

/// Startup-time options for the preview service.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// How PDFs are handed back.
    pub delivery: DeliveryMode,
    /// Last page included in a conversion.
    pub page_limit: u32,
    /// Parent of the per-conversion scratch directories.
    pub scratch_dir: PathBuf,
}

impl PreviewOptions {
    /// Build options from the application settings.
    #[must_use]
    pub fn from_settings(settings: &PreviewSettings) -> Self {
        Self {
            delivery: settings.delivery,
            page_limit: settings.page_limit,
            scratch_dir: settings
                .scratch_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
        }
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self::from_settings(&PreviewSettings::default())
    }
}

/// What the conversion endpoint sends back.
#[derive(Debug, Clone)]
pub enum PreviewPayload {
    /// Raw PDF bytes.
    Pdf(Bytes),
    /// Base64-encoded PDF bytes.
    Base64(String),
    /// Presigned download URL for the stored PDF.
    Redirect(PresignedUrl),
}

/// Serves converted PDFs, converting on first request.
pub struct PreviewService {
    storage: Arc<StorageService>,
    converter: Arc<dyn DocumentConverter>,
    in_flight: Cache<String, Bytes>,
    options: PreviewOptions,
}

impl PreviewService {
    /// Create a new preview service.
    #[must_use]
    pub fn new(
        storage: Arc<StorageService>,
        converter: Arc<dyn DocumentConverter>,
        options: PreviewOptions,
    ) -> Self {
        let in_flight = Cache::builder()
            .max_capacity(MAX_IN_FLIGHT)
            .time_to_live(Duration::from_secs(IN_FLIGHT_TTL_SECS))
            .build();

        Self {
            storage,
            converter,
            in_flight,
            options,
        }
    }

    /// Configured delivery mode.
    #[must_use]
    pub fn delivery(&self) -> DeliveryMode {
        self.options.delivery
    }

    /// Return the PDF for `source_key`, converting it if no PDF is stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `source_key` is empty
    /// - The extension is not convertible
    /// - The source object is missing or empty
    /// - The converter or storage fails
    pub async fn render(&self, source_key: &str) -> Result<PreviewPayload, PreviewError> {
        let source_key = source_key.trim();
        if source_key.is_empty() {
            return Err(PreviewError::MissingKey);
        }

        let converted_key = keys::converted_key(source_key);

        if self.storage.exists(&converted_key).await {
            info!(key = %source_key, converted_key = %converted_key, "Serving stored PDF");
            return self.deliver(&converted_key, None).await;
        }

        let pdf = self.convert_once(source_key, &converted_key).await?;
        self.deliver(&converted_key, Some(pdf)).await
    }

    /// Run the conversion for `converted_key` at most once at a time.
    ///
    /// Callers arriving while a conversion is running await its result.
    async fn convert_once(
        &self,
        source_key: &str,
        converted_key: &str,
    ) -> Result<Bytes, PreviewError> {
        let result = self
            .in_flight
            .try_get_with(
                converted_key.to_string(),
                self.convert_and_store(source_key, converted_key),
            )
            .await
            .map_err(|shared| Arc::try_unwrap(shared).unwrap_or_else(PreviewError::Shared));

        // The stored object is the cache from here on.
        self.in_flight.invalidate(converted_key).await;
        result
    }

    async fn convert_and_store(
        &self,
        source_key: &str,
        converted_key: &str,
    ) -> Result<Bytes, PreviewError> {
        let format = OfficeFormat::from_filename(source_key)
            .filter(|_| self.converter.can_convert(source_key))
            .ok_or_else(|| PreviewError::Unsupported(source_key.to_string()))?;
        let file_name = Path::new(source_key)
            .file_name()
            .ok_or_else(|| PreviewError::Unsupported(source_key.to_string()))?;

        let source = match self.storage.read(source_key).await {
            Ok(data) => data,
            Err(StorageError::NotFound { .. }) => {
                return Err(PreviewError::SourceNotFound(source_key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if source.is_empty() {
            return Err(PreviewError::EmptySource(source_key.to_string()));
        }

        // Removed on drop, whichever way this function exits.
        let scratch = tempfile::Builder::new()
            .prefix("docview-")
            .tempdir_in(&self.options.scratch_dir)
            .map_err(ConversionError::Io)?;
        let input = scratch.path().join(file_name);
        tokio::fs::write(&input, &source)
            .await
            .map_err(ConversionError::Io)?;

        let filter = ExportFilter::new(format, self.options.page_limit);
        debug!(key = %source_key, filter = %filter, "Converting");
        let output = self.converter.convert(&input, &filter).await?;

        let pdf = Bytes::from(
            tokio::fs::read(&output)
                .await
                .map_err(ConversionError::Io)?,
        );
        self.storage
            .write(converted_key, pdf.clone(), PDF_CONTENT_TYPE)
            .await?;

        info!(
            key = %source_key,
            converted_key = %converted_key,
            size = pdf.len(),
            "Converted and stored PDF"
        );
        Ok(pdf)
    }

    async fn deliver(
        &self,
        converted_key: &str,
        pdf: Option<Bytes>,
    ) -> Result<PreviewPayload, PreviewError> {
        match self.options.delivery {
            DeliveryMode::Redirect => Ok(PreviewPayload::Redirect(
                self.storage.presign_download(converted_key).await?,
            )),
            DeliveryMode::Binary => Ok(PreviewPayload::Pdf(
                self.load(converted_key, pdf).await?,
            )),
            DeliveryMode::Base64 => Ok(PreviewPayload::Base64(
                STANDARD.encode(self.load(converted_key, pdf).await?),
            )),
        }
    }

    async fn load(&self, key: &str, pdf: Option<Bytes>) -> Result<Bytes, PreviewError> {
        match pdf {
            Some(pdf) => Ok(pdf),
            None => Ok(self.storage.read(key).await?),
        }
    }
}
