//! Office formats that can be converted to PDF.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Office document format accepted for conversion.
///
/// This is the allow-list shared by the server's convertibility check and the
/// client's pre-upload validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfficeFormat {
    /// Legacy Excel workbook.
    Xls,
    /// Excel workbook.
    Xlsx,
    /// Legacy Word document.
    Doc,
    /// Word document.
    Docx,
    /// Legacy PowerPoint presentation.
    Ppt,
    /// PowerPoint presentation.
    Pptx,
}

impl OfficeFormat {
    /// Every supported format.
    pub const ALL: [Self; 6] = [
        Self::Xls,
        Self::Xlsx,
        Self::Doc,
        Self::Docx,
        Self::Ppt,
        Self::Pptx,
    ];

    /// Extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Ppt => "ppt",
            Self::Pptx => "pptx",
        }
    }

    /// LibreOffice PDF export filter for this format.
    #[must_use]
    pub const fn export_filter(self) -> &'static str {
        match self {
            Self::Xls | Self::Xlsx => "calc_pdf_Export",
            Self::Doc | Self::Docx => "writer_pdf_Export",
            Self::Ppt | Self::Pptx => "impress_pdf_Export",
        }
    }

    /// Parse a bare extension (no dot), ignoring case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Detect the format from a filename or object key.
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for OfficeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
