//! Upload URL and preview URL routes.

use axum::{Json, Router, extract::State, routing::post};
use tracing::info;

use crate::{AppState, error::ApiError};
use docview_shared::types::{
    ApiResponse, PreviewUrlRequest, PreviewUrlResponse, UploadUrlRequest, UploadUrlResponse,
};

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get_upload_url", post(get_upload_url))
        .route("/get_preview_url", post(get_preview_url))
}

/// POST `/api/get_upload_url`
/// Issue a presigned PUT URL and a file ID for `filename`.
async fn get_upload_url(
    State(state): State<AppState>,
    Json(payload): Json<UploadUrlRequest>,
) -> Result<Json<ApiResponse<UploadUrlResponse>>, ApiError> {
    let filename = payload.filename.unwrap_or_default();
    let ticket = state.uploads.request_upload(&filename).await?;

    info!(
        file_id = %ticket.file_id,
        expires_at = %ticket.expires_at.to_rfc3339(),
        "Upload URL requested"
    );

    Ok(Json(ApiResponse::ok(UploadUrlResponse {
        upload_url: ticket.upload_url,
        file_id: ticket.file_id.to_string(),
    })))
}

/// POST `/api/get_preview_url`
/// Resolve a file ID to its conversion endpoint URL.
async fn get_preview_url(
    State(state): State<AppState>,
    Json(payload): Json<PreviewUrlRequest>,
) -> Result<Json<ApiResponse<PreviewUrlResponse>>, ApiError> {
    let file_id = payload.file_id.unwrap_or_default();
    let preview_url = state.uploads.preview_url(&file_id).await?;

    Ok(Json(ApiResponse::ok(PreviewUrlResponse { preview_url })))
}
