//! Wire types for the upload/preview API.
//!
//! Field names are camelCase on the wire to match the browser client.

use serde::{Deserialize, Serialize};

/// Envelope returned by every JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body of `POST /api/get_upload_url`.
///
/// `filename` is optional at the serde level so a missing field maps to a
/// validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    /// Original filename chosen by the user.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Data returned by `POST /api/get_upload_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Presigned PUT URL for the raw file bytes.
    pub upload_url: String,
    /// Identifier to pass to the preview endpoint.
    pub file_id: String,
}

/// Body of `POST /api/get_preview_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewUrlRequest {
    /// Identifier returned by the upload URL call.
    #[serde(default)]
    pub file_id: Option<String>,
}

/// Data returned by `POST /api/get_preview_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewUrlResponse {
    /// URL of the conversion endpoint for the uploaded object.
    pub preview_url: String,
}
