//! Upload service implementation.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use docview_shared::types::FileId;

use super::error::UploadError;
use super::registry::{UploadRecord, UploadRegistry};
use crate::keys;
use crate::preview::CONVERT_PATH;
use crate::storage::StorageService;

/// Result of an upload URL request.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    /// Issued identifier.
    pub file_id: FileId,
    /// Presigned PUT URL.
    pub upload_url: String,
    /// Key the URL writes to.
    pub object_key: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Issues upload URLs and resolves file IDs to preview URLs.
pub struct UploadService {
    storage: Arc<StorageService>,
    registry: UploadRegistry,
    public_base_url: String,
}

impl UploadService {
    /// Create a new upload service.
    ///
    /// `public_base_url` is the externally reachable root of this service and
    /// prefixes every preview URL.
    #[must_use]
    pub fn new(
        storage: Arc<StorageService>,
        registry: UploadRegistry,
        public_base_url: impl Into<String>,
    ) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            storage,
            registry,
            public_base_url,
        }
    }

    /// Issue a presigned upload URL for `filename`.
    ///
    /// The record is stored only once presigning succeeded, so a failed
    /// request leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `filename` is empty
    /// - Presigning fails
    pub async fn request_upload(&self, filename: &str) -> Result<UploadTicket, UploadError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(UploadError::MissingFilename);
        }

        let file_id = FileId::new();
        let object_key = keys::source_key(file_id, filename);
        let presigned = self.storage.presign_upload(&object_key).await?;

        self.registry
            .remember(UploadRecord {
                file_id,
                filename: filename.to_string(),
                object_key: object_key.clone(),
                created_at: Utc::now(),
            })
            .await;

        info!(file_id = %file_id, key = %object_key, "Upload URL issued");

        Ok(UploadTicket {
            file_id,
            upload_url: presigned.url,
            object_key,
            expires_at: presigned.expires_at,
        })
    }

    /// Build the preview URL for a previously issued `file_id`.
    ///
    /// Storage is not consulted; the object may not have been uploaded yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `file_id` is empty
    /// - `file_id` was never issued or its record expired
    pub async fn preview_url(&self, file_id: &str) -> Result<String, UploadError> {
        let raw = file_id.trim();
        if raw.is_empty() {
            return Err(UploadError::MissingFileId);
        }

        // Anything that is not a UUID cannot have been issued here.
        let Ok(file_id) = FileId::from_str(raw) else {
            debug!(file_id = %raw, "Unparsable file id");
            return Err(UploadError::NotFound(raw.to_string()));
        };

        let record = self
            .registry
            .lookup(file_id)
            .await
            .ok_or_else(|| UploadError::NotFound(raw.to_string()))?;

        Ok(self.convert_url(&record.object_key))
    }

    /// Conversion endpoint URL for `object_key`.
    fn convert_url(&self, object_key: &str) -> String {
        format!("{}{CONVERT_PATH}?key={object_key}", self.public_base_url)
    }

    /// Access the record store.
    #[must_use]
    pub fn registry(&self) -> &UploadRegistry {
        &self.registry
    }
}
