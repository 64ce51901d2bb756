//! Document preview server
//!
//! Main entry point for the upload and preview service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docview_api::{AppState, create_router};
use docview_core::conversion::LibreOfficeConverter;
use docview_core::preview::{PreviewOptions, PreviewService};
use docview_core::storage::{StorageConfig, StorageService};
use docview_core::upload::{UploadRegistry, UploadService};
use docview_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docview=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let storage = Arc::new(
        StorageService::from_config(StorageConfig::from_settings(&config.storage))
            .context("Failed to initialize object storage")?,
    );
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        "Object storage configured"
    );

    let registry = UploadRegistry::with_config(
        config.uploads.max_records,
        config.uploads.record_ttl_secs,
    );
    let uploads = UploadService::new(
        storage.clone(),
        registry,
        config.preview.public_base_url.clone(),
    );

    let converter = Arc::new(LibreOfficeConverter::from_settings(&config.converter));
    let options = PreviewOptions::from_settings(&config.preview);
    info!(
        binary = %config.converter.binary,
        delivery = options.delivery.as_str(),
        page_limit = options.page_limit,
        "Converter configured"
    );
    let previews = PreviewService::new(storage, converter, options);

    let state = AppState {
        uploads: Arc::new(uploads),
        previews: Arc::new(previews),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
