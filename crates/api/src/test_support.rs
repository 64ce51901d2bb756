//! Shared fixtures for route tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;

use crate::AppState;
use docview_core::conversion::{ConversionError, DocumentConverter, ExportFilter};
use docview_core::preview::{PreviewOptions, PreviewService};
use docview_core::storage::{StorageConfig, StorageProvider, StorageService};
use docview_core::upload::{UploadRegistry, UploadService};
use docview_shared::DeliveryMode;
use docview_shared::types::OfficeFormat;

/// Converter double that prefixes the input with a fake PDF header.
#[derive(Default)]
pub struct FakeConverter {
    calls: AtomicUsize,
}

impl FakeConverter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentConverter for FakeConverter {
    fn can_convert(&self, filename: &str) -> bool {
        OfficeFormat::from_filename(filename).is_some()
    }

    async fn convert(&self, input: &Path, _filter: &ExportFilter) -> Result<PathBuf, ConversionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut pdf = b"%PDF-fake:".to_vec();
        pdf.extend(tokio::fs::read(input).await?);
        let output = input.with_extension("pdf");
        tokio::fs::write(&output, pdf).await?;
        Ok(output)
    }
}

pub struct Fixture {
    pub state: AppState,
    /// Backing store of the preview service.
    pub objects: Arc<StorageService>,
    pub converter: Arc<FakeConverter>,
    _scratch: tempfile::TempDir,
}

impl Fixture {
    /// Put an object where the preview service will look for it.
    pub async fn seed(&self, key: &str, data: &'static [u8]) {
        self.objects
            .write(key, Bytes::from_static(data), "application/octet-stream")
            .await
            .unwrap();
    }
}

/// S3 store at `endpoint` with static credentials; signing never contacts it.
pub fn s3_storage(endpoint: &str) -> Arc<StorageService> {
    let provider = StorageProvider::s3(
        endpoint,
        "previews",
        "test-access-key",
        "test-secret-key",
        "us-east-1",
    );
    Arc::new(StorageService::from_config(StorageConfig::new(provider)).unwrap())
}

/// Upload URLs are signed locally against an S3 endpoint that is never
/// contacted; previews run against `objects`.
pub fn test_state_on(delivery: DeliveryMode, objects: Arc<StorageService>) -> Fixture {
    let uploads = UploadService::new(
        s3_storage("http://127.0.0.1:9000"),
        UploadRegistry::new(),
        "http://localhost:8080",
    );

    let converter = Arc::new(FakeConverter::default());
    let scratch = tempfile::tempdir().unwrap();
    let options = PreviewOptions {
        delivery,
        page_limit: 25,
        scratch_dir: scratch.path().to_path_buf(),
    };
    let previews = PreviewService::new(objects.clone(), converter.clone(), options);

    Fixture {
        state: AppState {
            uploads: Arc::new(uploads),
            previews: Arc::new(previews),
        },
        objects,
        converter,
        _scratch: scratch,
    }
}

/// Previews run against an in-memory store.
pub fn test_state_with(delivery: DeliveryMode) -> Fixture {
    let objects =
        Arc::new(StorageService::from_config(StorageConfig::new(StorageProvider::Memory)).unwrap());
    test_state_on(delivery, objects)
}

pub fn test_state() -> Fixture {
    test_state_with(DeliveryMode::Binary)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
