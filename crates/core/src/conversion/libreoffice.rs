//! Headless LibreOffice converter.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use docview_shared::config::ConverterSettings;
use docview_shared::types::OfficeFormat;

use super::error::ConversionError;
use super::filter::ExportFilter;
use super::DocumentConverter;

/// Runs `soffice --headless --convert-to` as a child process.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    binary: String,
    timeout: Duration,
}

impl LibreOfficeConverter {
    /// Create a converter invoking `binary`, killed after `timeout`.
    #[must_use]
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Build from the application settings.
    #[must_use]
    pub fn from_settings(settings: &ConverterSettings) -> Self {
        Self::new(
            settings.binary.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Arguments for converting `input` into `out_dir`.
    ///
    /// Each conversion gets its own user profile under `out_dir` so parallel
    /// instances do not contend for the profile lock.
    fn arguments(input: &Path, out_dir: &Path, filter: &ExportFilter) -> Vec<String> {
        vec![
            format!(
                "-env:UserInstallation=file://{}",
                out_dir.join(".profile").display()
            ),
            "--headless".to_string(),
            "--norestore".to_string(),
            "--nolockcheck".to_string(),
            "--convert-to".to_string(),
            filter.to_string(),
            "--outdir".to_string(),
            out_dir.display().to_string(),
            input.display().to_string(),
        ]
    }

    /// Where LibreOffice writes the PDF for `input`.
    fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
        let mut name = input
            .file_stem()
            .unwrap_or(input.as_os_str())
            .to_os_string();
        name.push(".pdf");
        out_dir.join(name)
    }
}

#[async_trait]
impl DocumentConverter for LibreOfficeConverter {
    fn can_convert(&self, filename: &str) -> bool {
        OfficeFormat::from_filename(filename).is_some()
    }

    async fn convert(
        &self,
        input: &Path,
        filter: &ExportFilter,
    ) -> Result<PathBuf, ConversionError> {
        let out_dir = input.parent().unwrap_or_else(|| Path::new("."));
        let args = Self::arguments(input, out_dir, filter);
        debug!(binary = %self.binary, ?args, "Starting converter");

        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ConversionError::Launch)?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ConversionError::TimedOut(self.timeout.as_secs()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, stderr = %stderr, "Converter failed");
            return Err(ConversionError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let out_path = Self::output_path(input, out_dir);
        if !tokio::fs::try_exists(&out_path).await? {
            return Err(ConversionError::MissingOutput(
                out_path.display().to_string(),
            ));
        }

        Ok(out_path)
    }
}
