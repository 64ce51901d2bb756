//! LibreOffice `--convert-to` filter specifications.

use std::fmt;

use docview_shared::types::OfficeFormat;

/// Page range restricted PDF export filter.
///
/// Renders as `pdf:<export>:{"PageRange":{"type":"string","value":"1-<n>"}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFilter {
    format: OfficeFormat,
    page_limit: u32,
}

impl ExportFilter {
    /// Filter for `format` keeping pages `1..=page_limit`.
    #[must_use]
    pub const fn new(format: OfficeFormat, page_limit: u32) -> Self {
        Self { format, page_limit }
    }

    /// Source format.
    #[must_use]
    pub const fn format(&self) -> OfficeFormat {
        self.format
    }

    /// Last exported page.
    #[must_use]
    pub const fn page_limit(&self) -> u32 {
        self.page_limit
    }
}

impl fmt::Display for ExportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"pdf:{}:{{"PageRange":{{"type":"string","value":"1-{}"}}}}"#,
            self.format.export_filter(),
            self.page_limit
        )
    }
}
