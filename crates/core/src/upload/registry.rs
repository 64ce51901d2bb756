//! In-memory upload record store backed by Moka.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;

use docview_shared::types::FileId;

/// Default maximum number of records kept.
const DEFAULT_MAX_RECORDS: u64 = 10_000;

/// Default time-to-live for a record (1 day).
const DEFAULT_TTL_SECS: u64 = 86_400;

/// Association between an issued file ID and the uploaded filename.
///
/// Written when the upload URL is issued, before the client's PUT has
/// happened, so the object may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Issued identifier.
    pub file_id: FileId,
    /// Filename as supplied by the client.
    pub filename: String,
    /// Object key the upload URL targets.
    pub object_key: String,
    /// When the upload URL was issued.
    pub created_at: DateTime<Utc>,
}

/// Keyed upload record store with capacity and TTL eviction.
///
/// Cheap to clone; clones share the same underlying cache.
#[derive(Clone)]
pub struct UploadRegistry {
    records: Cache<FileId, UploadRecord>,
}

impl UploadRegistry {
    /// Creates a registry with default settings.
    ///
    /// Default: 10 000 records max, 1 day TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_MAX_RECORDS, DEFAULT_TTL_SECS)
    }

    /// Creates a registry with custom bounds.
    #[must_use]
    pub fn with_config(max_records: u64, ttl_secs: u64) -> Self {
        let records = Cache::builder()
            .max_capacity(max_records)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { records }
    }

    /// Stores `record`, replacing any record with the same file ID.
    pub async fn remember(&self, record: UploadRecord) {
        self.records.insert(record.file_id, record).await;
    }

    /// Looks up the record for `file_id`.
    pub async fn lookup(&self, file_id: FileId) -> Option<UploadRecord> {
        self.records.get(&file_id).await
    }

    /// Returns the number of records currently held.
    ///
    /// Moka updates this lazily; call [`Self::run_pending_tasks`] first for
    /// an exact figure.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.records.entry_count()
    }

    /// Whether the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs cache maintenance (expiry and eviction bookkeeping).
    pub async fn run_pending_tasks(&self) {
        self.records.run_pending_tasks().await;
    }
}

impl Default for UploadRegistry {
    fn default() -> Self {
        Self::new()
    }
}
