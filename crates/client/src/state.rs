//! Screen state machine of the preview client.
//!
//! ```text
//! NoFile -> FileSelected -> Uploading -> Uploaded -> PreviewRequested -> PreviewShown
//!              ^               |            ^              |
//!              +--- failed ----+            +--- failed ---+
//! ```
//!
//! `close` returns to `NoFile` from anywhere. The machine performs no I/O;
//! [`crate::Session`] feeds it the outcome of each network call.

use std::fmt;

use bytes::Bytes;
use docview_shared::types::OfficeFormat;

use crate::error::{ClientError, ClientResult};

/// Where the user is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// Nothing selected.
    #[default]
    NoFile,
    /// An office document is selected but not uploaded.
    FileSelected,
    /// Upload URL requested or bytes in transit.
    Uploading,
    /// The object store accepted the bytes.
    Uploaded,
    /// Preview URL requested.
    PreviewRequested,
    /// Preview URL available for embedding.
    PreviewShown,
}

impl FlowState {
    /// Whether a network call is outstanding.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Uploading | Self::PreviewRequested)
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoFile => "no file is selected",
            Self::FileSelected => "a file is selected",
            Self::Uploading => "uploading",
            Self::Uploaded => "uploaded",
            Self::PreviewRequested => "requesting a preview",
            Self::PreviewShown => "showing a preview",
        };
        f.write_str(name)
    }
}

/// A file picked or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original filename.
    pub name: String,
    /// Raw file bytes.
    pub content: Bytes,
}

impl SelectedFile {
    /// Create a selected file.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Client flow state plus the data gathered along the way.
#[derive(Debug, Clone, Default)]
pub struct Flow {
    state: FlowState,
    file: Option<SelectedFile>,
    file_id: Option<String>,
    preview_url: Option<String>,
    notice: Option<String>,
}

impl Flow {
    /// Start with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Selected file, if any.
    #[must_use]
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// File ID issued by the server for the uploaded file.
    #[must_use]
    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    /// URL to embed in the preview frame.
    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        self.preview_url.as_deref()
    }

    /// Message shown to the user after a rejected action or failed call.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Select a file, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidFileType`] for anything outside the
    /// office allow-list; the state is left unchanged and the notice is set.
    pub fn select(&mut self, file: SelectedFile) -> ClientResult<()> {
        self.ensure_idle("select a file")?;

        if OfficeFormat::from_filename(&file.name).is_none() {
            let err = ClientError::InvalidFileType;
            self.notice = Some(err.to_string());
            return Err(err);
        }

        *self = Self {
            state: FlowState::FileSelected,
            file: Some(file),
            ..Self::default()
        };
        Ok(())
    }

    /// Enter `Uploading`, returning the file to send.
    ///
    /// # Errors
    ///
    /// Returns an error unless a file is selected and not yet uploaded.
    pub fn begin_upload(&mut self) -> ClientResult<SelectedFile> {
        self.require(FlowState::FileSelected, "upload")?;
        let file = self.file.clone().ok_or(ClientError::InvalidTransition {
            action: "upload",
            state: FlowState::NoFile,
        })?;

        self.state = FlowState::Uploading;
        self.notice = None;
        Ok(file)
    }

    /// Record a completed upload.
    ///
    /// # Errors
    ///
    /// Returns an error if no upload is in progress.
    pub fn upload_succeeded(&mut self, file_id: impl Into<String>) -> ClientResult<()> {
        self.require(FlowState::Uploading, "finish an upload")?;
        self.state = FlowState::Uploaded;
        self.file_id = Some(file_id.into());
        Ok(())
    }

    /// Record a failed upload; the file stays selected for another try.
    ///
    /// # Errors
    ///
    /// Returns an error if no upload is in progress.
    pub fn upload_failed(&mut self, message: impl Into<String>) -> ClientResult<()> {
        self.require(FlowState::Uploading, "fail an upload")?;
        self.state = FlowState::FileSelected;
        self.file_id = None;
        self.notice = Some(message.into());
        Ok(())
    }

    /// Enter `PreviewRequested`, returning the file ID to resolve.
    ///
    /// # Errors
    ///
    /// Returns an error unless the selected file has been uploaded.
    pub fn begin_preview(&mut self) -> ClientResult<String> {
        self.require(FlowState::Uploaded, "preview")?;
        let file_id = self.file_id.clone().ok_or(ClientError::InvalidTransition {
            action: "preview",
            state: FlowState::FileSelected,
        })?;

        self.state = FlowState::PreviewRequested;
        self.notice = None;
        Ok(file_id)
    }

    /// Record the preview URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no preview request is in progress.
    pub fn preview_succeeded(&mut self, url: impl Into<String>) -> ClientResult<()> {
        self.require(FlowState::PreviewRequested, "show a preview")?;
        self.state = FlowState::PreviewShown;
        self.preview_url = Some(url.into());
        Ok(())
    }

    /// Record a failed preview request; the upload is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if no preview request is in progress.
    pub fn preview_failed(&mut self, message: impl Into<String>) -> ClientResult<()> {
        self.require(FlowState::PreviewRequested, "fail a preview")?;
        self.state = FlowState::Uploaded;
        self.notice = Some(message.into());
        Ok(())
    }

    /// Discard everything and return to `NoFile`.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    fn require(&self, expected: FlowState, action: &'static str) -> ClientResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ClientError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn ensure_idle(&self, action: &'static str) -> ClientResult<()> {
        if self.state.is_busy() {
            Err(ClientError::InvalidTransition {
                action,
                state: self.state,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn docx() -> SelectedFile {
        SelectedFile::new("memo.docx", &b"words"[..])
    }

    fn uploaded() -> Flow {
        let mut flow = Flow::new();
        flow.select(docx()).unwrap();
        flow.begin_upload().unwrap();
        flow.upload_succeeded("f1").unwrap();
        flow
    }

    #[test]
    fn test_happy_path() {
        let mut flow = Flow::new();
        assert_eq!(flow.state(), FlowState::NoFile);

        flow.select(docx()).unwrap();
        assert_eq!(flow.state(), FlowState::FileSelected);

        let file = flow.begin_upload().unwrap();
        assert_eq!(file.name, "memo.docx");
        assert_eq!(flow.state(), FlowState::Uploading);

        flow.upload_succeeded("f1").unwrap();
        assert_eq!(flow.state(), FlowState::Uploaded);
        assert_eq!(flow.file_id(), Some("f1"));

        assert_eq!(flow.begin_preview().unwrap(), "f1");
        assert_eq!(flow.state(), FlowState::PreviewRequested);

        flow.preview_succeeded("http://localhost:8080/convert?key=f1.docx")
            .unwrap();
        assert_eq!(flow.state(), FlowState::PreviewShown);
        assert_eq!(
            flow.preview_url(),
            Some("http://localhost:8080/convert?key=f1.docx")
        );
    }

    #[rstest]
    #[case("malware.exe")]
    #[case("notes.txt")]
    #[case("README")]
    fn test_rejects_non_office_files(#[case] name: &str) {
        let mut flow = Flow::new();
        let err = flow.select(SelectedFile::new(name, &b"x"[..])).unwrap_err();

        assert!(matches!(err, ClientError::InvalidFileType));
        assert_eq!(flow.state(), FlowState::NoFile);
        assert_eq!(flow.notice(), Some("invalid file type"));
    }

    #[test]
    fn test_rejected_selection_keeps_previous_file() {
        let mut flow = Flow::new();
        flow.select(docx()).unwrap();

        assert!(flow.select(SelectedFile::new("malware.exe", &b"MZ"[..])).is_err());
        assert_eq!(flow.state(), FlowState::FileSelected);
        assert_eq!(flow.file().map(|f| f.name.as_str()), Some("memo.docx"));
    }

    #[test]
    fn test_failed_upload_returns_to_file_selected() {
        let mut flow = Flow::new();
        flow.select(docx()).unwrap();
        flow.begin_upload().unwrap();

        flow.upload_failed("upload rejected with status 403").unwrap();
        assert_eq!(flow.state(), FlowState::FileSelected);
        assert_eq!(flow.notice(), Some("upload rejected with status 403"));
        assert!(flow.file_id().is_none());
    }

    #[test]
    fn test_failed_preview_returns_to_uploaded() {
        let mut flow = uploaded();
        flow.begin_preview().unwrap();

        flow.preview_failed("File not found").unwrap();
        assert_eq!(flow.state(), FlowState::Uploaded);
        assert_eq!(flow.file_id(), Some("f1"));
        assert_eq!(flow.notice(), Some("File not found"));
    }

    #[test]
    fn test_close_resets_from_any_state() {
        let mut flow = uploaded();
        flow.begin_preview().unwrap();
        flow.close();

        assert_eq!(flow.state(), FlowState::NoFile);
        assert!(flow.file().is_none());
        assert!(flow.file_id().is_none());
    }

    #[test]
    fn test_out_of_order_actions_are_rejected() {
        let mut flow = Flow::new();
        assert!(matches!(
            flow.begin_upload(),
            Err(ClientError::InvalidTransition {
                state: FlowState::NoFile,
                ..
            })
        ));

        flow.select(docx()).unwrap();
        assert!(flow.begin_preview().is_err());

        flow.begin_upload().unwrap();
        assert!(flow.select(docx()).is_err());
        assert_eq!(flow.state(), FlowState::Uploading);
    }

    #[test]
    fn test_new_selection_after_preview_starts_over() {
        let mut flow = uploaded();
        flow.select(SelectedFile::new("deck.pptx", &b"slides"[..]))
            .unwrap();

        assert_eq!(flow.state(), FlowState::FileSelected);
        assert!(flow.file_id().is_none());
    }
}
