//! Mapping from domain errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use docview_core::preview::PreviewError;
use docview_core::storage::StorageError;
use docview_core::upload::UploadError;
use docview_shared::AppError;
use docview_shared::types::ApiResponse;

/// Error returned by the JSON API endpoints.
///
/// Renders as `{ "success": false, "error": <message> }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

fn status_of(err: &AppError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Log at the level matching the status actually returned.
fn log(err: &AppError, status: StatusCode) {
    if status.is_server_error() {
        error!(status = status.as_u16(), code = err.error_code(), error = %err, "Request failed");
    } else {
        warn!(status = status.as_u16(), code = err.error_code(), error = %err, "Request rejected");
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        log(&self.0, status);
        let body = ApiResponse::<()>::failure(self.0.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        let app = match err {
            UploadError::MissingFilename | UploadError::MissingFileId => {
                AppError::Validation(err.to_string())
            }
            UploadError::NotFound(_) => AppError::NotFound(err.to_string()),
            UploadError::Storage(e) => AppError::Storage(e.to_string()),
        };
        Self(app)
    }
}

/// Error returned by the conversion endpoint.
///
/// Renders as `{ "message": <message> }`. A missing key is a 400; every
/// other failure is a generic 500.
#[derive(Debug)]
pub struct ConvertError(pub AppError);

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log(&self.0, status);
        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

impl From<PreviewError> for ConvertError {
    fn from(err: PreviewError) -> Self {
        let root = err.root();
        let message = root.to_string();
        let app = match root {
            PreviewError::MissingKey => AppError::Validation(message),
            PreviewError::SourceNotFound(_)
            | PreviewError::EmptySource(_)
            | PreviewError::Storage(StorageError::NotFound { .. }) => AppError::NotFound(message),
            PreviewError::Unsupported(_) => AppError::UnsupportedFormat(message),
            PreviewError::Conversion(_) => AppError::Conversion(message),
            PreviewError::Storage(_) => AppError::Storage(message),
            PreviewError::Shared(_) => AppError::Internal(message),
        };
        Self(app)
    }
}
