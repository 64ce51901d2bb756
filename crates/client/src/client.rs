//! HTTP calls of the preview flow.

use reqwest::{Client, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use docview_shared::types::{
    ApiResponse, PreviewUrlRequest, PreviewUrlResponse, UploadUrlRequest, UploadUrlResponse,
};

use crate::error::{ClientError, ClientResult};
use crate::state::SelectedFile;

/// Client for the upload/preview API and the presigned upload URL.
#[derive(Debug, Clone)]
pub struct PreviewClient {
    http: Client,
    base_url: String,
}

impl PreviewClient {
    /// Create a client for the API served at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the API for a presigned upload URL for `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a failure envelope.
    pub async fn request_upload_url(&self, filename: &str) -> ClientResult<UploadUrlResponse> {
        let body = UploadUrlRequest {
            filename: Some(filename.to_string()),
        };
        self.post_json("/api/get_upload_url", &body).await
    }

    /// PUT the raw bytes to a presigned upload URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn put_object(&self, upload_url: &str, file: &SelectedFile) -> ClientResult<()> {
        let response = self
            .http
            .put(upload_url)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(file.content.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), filename = %file.name, "Upload rejected");
            return Err(ClientError::UploadRejected(status.as_u16()));
        }
        Ok(())
    }

    /// Request an upload URL and send `file` to it, returning the file ID.
    ///
    /// # Errors
    ///
    /// Returns an error if either call fails.
    pub async fn upload(&self, file: &SelectedFile) -> ClientResult<String> {
        let ticket = self.request_upload_url(&file.name).await?;
        self.put_object(&ticket.upload_url, file).await?;

        debug!(file_id = %ticket.file_id, size = file.content.len(), "Upload complete");
        Ok(ticket.file_id)
    }

    /// Resolve `file_id` to the URL of its preview.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a failure envelope.
    pub async fn request_preview_url(&self, file_id: &str) -> ClientResult<String> {
        let body = PreviewUrlRequest {
            file_id: Some(file_id.to_string()),
        };
        let data: PreviewUrlResponse = self.post_json("/api/get_preview_url", &body).await?;
        Ok(data.preview_url)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await?;

        match envelope {
            ApiResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            ApiResponse { error, .. } => Err(ClientError::Api {
                status: status.as_u16(),
                message: error.unwrap_or_else(|| format!("unexpected response ({status})")),
            }),
        }
    }
}
