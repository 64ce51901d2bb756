//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The upload URL and preview URL endpoints
//! - The conversion endpoint serving PDFs
//! - Error-to-response mapping

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use docview_core::preview::PreviewService;
use docview_core::upload::UploadService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upload URL issuance and the upload record store.
    pub uploads: Arc<UploadService>,
    /// Conversion and PDF delivery.
    pub previews: Arc<PreviewService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
