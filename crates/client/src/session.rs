//! A user session driving [`Flow`] with a [`PreviewClient`].

use tracing::{info, warn};

use crate::client::PreviewClient;
use crate::error::ClientResult;
use crate::state::{Flow, FlowState, SelectedFile};

/// One preview screen: the flow state plus the client it talks through.
///
/// Failed calls are reported once and never retried; the user decides
/// whether to try again.
#[derive(Debug, Clone)]
pub struct Session {
    client: PreviewClient,
    flow: Flow,
}

impl Session {
    /// Start a session with nothing selected.
    #[must_use]
    pub fn new(client: PreviewClient) -> Self {
        Self {
            client,
            flow: Flow::new(),
        }
    }

    /// Current flow, for rendering.
    #[must_use]
    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    /// Select or drop a file. Validation is local; nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not an office document or a call is
    /// in progress.
    pub fn select(&mut self, file: SelectedFile) -> ClientResult<()> {
        self.flow.select(file)
    }

    /// Upload the selected file.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is selected or the upload fails; on
    /// failure the file stays selected.
    pub async fn upload(&mut self) -> ClientResult<()> {
        let file = self.flow.begin_upload()?;

        match self.client.upload(&file).await {
            Ok(file_id) => {
                info!(file_id = %file_id, filename = %file.name, "File uploaded");
                self.flow.upload_succeeded(file_id)
            }
            Err(err) => {
                warn!(filename = %file.name, error = %err, "Upload failed");
                self.flow.upload_failed(err.to_string())?;
                Err(err)
            }
        }
    }

    /// Request the preview URL of the uploaded file.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was uploaded or the request fails; on
    /// failure the upload is kept.
    pub async fn preview(&mut self) -> ClientResult<&str> {
        let file_id = self.flow.begin_preview()?;

        match self.client.request_preview_url(&file_id).await {
            Ok(url) => {
                self.flow.preview_succeeded(url)?;
                Ok(self.flow.preview_url().unwrap_or_default())
            }
            Err(err) => {
                warn!(file_id = %file_id, error = %err, "Preview request failed");
                self.flow.preview_failed(err.to_string())?;
                Err(err)
            }
        }
    }

    /// Close the preview and forget the file.
    pub fn close(&mut self) {
        self.flow.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use serde_json::json;

    #[tokio::test]
    async fn test_invalid_file_never_reaches_the_network() {
        let mut server = mockito::Server::new_async().await;
        let issue = server
            .mock("POST", "/api/get_upload_url")
            .expect(0)
            .create_async()
            .await;

        let mut session = Session::new(PreviewClient::new(server.url()));
        let err = session
            .select(SelectedFile::new("malware.exe", &b"MZ"[..]))
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidFileType));
        assert!(session.upload().await.is_err());

        assert_eq!(session.state(), FlowState::NoFile);
        assert_eq!(session.flow().notice(), Some("invalid file type"));
        issue.assert_async().await;
    }

    #[tokio::test]
    async fn test_full_flow() {
        let mut server = mockito::Server::new_async().await;
        let upload_url = format!("{}/previews/f1.xlsx", server.url());
        server
            .mock("POST", "/api/get_upload_url")
            .with_body(
                json!({ "success": true, "data": { "uploadUrl": upload_url, "fileId": "f1" } })
                    .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("PUT", "/previews/f1.xlsx")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("POST", "/api/get_preview_url")
            .with_body(
                json!({
                    "success": true,
                    "data": { "previewUrl": "http://localhost:8080/convert?key=f1.xlsx" }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut session = Session::new(PreviewClient::new(server.url()));
        session
            .select(SelectedFile::new("report.xlsx", &b"cells"[..]))
            .unwrap();
        session.upload().await.unwrap();
        assert_eq!(session.state(), FlowState::Uploaded);

        let url = session.preview().await.unwrap().to_string();
        assert_eq!(url, "http://localhost:8080/convert?key=f1.xlsx");
        assert_eq!(session.state(), FlowState::PreviewShown);

        session.close();
        assert_eq!(session.state(), FlowState::NoFile);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_selection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/get_upload_url")
            .with_status(500)
            .with_body(json!({ "success": false, "error": "Storage error: denied" }).to_string())
            .expect(1)
            .create_async()
            .await;

        let mut session = Session::new(PreviewClient::new(server.url()));
        session
            .select(SelectedFile::new("memo.docx", &b"words"[..]))
            .unwrap();

        assert!(session.upload().await.is_err());
        assert_eq!(session.state(), FlowState::FileSelected);
        assert_eq!(session.flow().notice(), Some("Storage error: denied"));
    }

    #[tokio::test]
    async fn test_failed_preview_keeps_upload() {
        let mut server = mockito::Server::new_async().await;
        let upload_url = format!("{}/previews/f1.ppt", server.url());
        server
            .mock("POST", "/api/get_upload_url")
            .with_body(
                json!({ "success": true, "data": { "uploadUrl": upload_url, "fileId": "f1" } })
                    .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("PUT", "/previews/f1.ppt")
            .create_async()
            .await;
        server
            .mock("POST", "/api/get_preview_url")
            .with_status(404)
            .with_body(json!({ "success": false, "error": "File not found" }).to_string())
            .create_async()
            .await;

        let mut session = Session::new(PreviewClient::new(server.url()));
        session
            .select(SelectedFile::new("deck.ppt", &b"slides"[..]))
            .unwrap();
        session.upload().await.unwrap();

        assert!(session.preview().await.is_err());
        assert_eq!(session.state(), FlowState::Uploaded);
        assert_eq!(session.flow().notice(), Some("File not found"));
    }
}
