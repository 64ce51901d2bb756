//! Object key derivation.
//!
//! Sources live at `<file_id><ext>` and their PDFs at `<file_id>.pdf`. The
//! extension is lower-cased and reduced to ASCII alphanumerics so keys are
//! safe to embed in a query string unescaped.

use std::path::Path;

use docview_shared::types::FileId;

/// Extension suffix used for converted artifacts.
pub const PDF_EXTENSION: &str = "pdf";

/// Normalized extension of `filename` including the leading dot, or empty.
#[must_use]
pub fn normalized_extension(filename: &str) -> String {
    let ext: String = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if ext.is_empty() {
        String::new()
    } else {
        format!(".{ext}")
    }
}

/// Object key for an uploaded source file.
#[must_use]
pub fn source_key(file_id: FileId, filename: &str) -> String {
    format!("{file_id}{}", normalized_extension(filename))
}

/// Key under which the PDF for `source_key` is stored.
///
/// Only the final extension is swapped, directories are kept.
#[must_use]
pub fn converted_key(source_key: &str) -> String {
    let path = Path::new(source_key);
    match path.extension() {
        Some(_) => path
            .with_extension(PDF_EXTENSION)
            .to_string_lossy()
            .into_owned(),
        None => format!("{source_key}.{PDF_EXTENSION}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("report.xlsx", ".xlsx")]
    #[case("REPORT.XLSX", ".xlsx")]
    #[case("archive.tar.gz", ".gz")]
    #[case("weird.x y!z", ".xyz")]
    #[case("README", "")]
    #[case(".hidden", "")]
    #[case("trailing.", "")]
    fn test_normalized_extension(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(normalized_extension(filename), expected);
    }

    #[test]
    fn test_source_key_embeds_file_id() {
        let id = FileId::new();
        assert_eq!(source_key(id, "report.xlsx"), format!("{id}.xlsx"));
        assert_eq!(source_key(id, "notes"), id.to_string());
    }

    #[rstest]
    #[case("f1.xlsx", "f1.pdf")]
    #[case("f1.docx", "f1.pdf")]
    #[case("uploads/f1.pptx", "uploads/f1.pdf")]
    #[case("f1", "f1.pdf")]
    #[case("f1.pdf", "f1.pdf")]
    fn test_converted_key(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(converted_key(source), expected);
    }

    proptest! {
        #[test]
        fn prop_source_key_is_query_safe(filename in ".*") {
            let id = FileId::new();
            let key = source_key(id, &filename);

            prop_assert!(key.starts_with(&id.to_string()));
            for c in key.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-';
                prop_assert!(is_safe, "Unexpected character in key: {}", c);
            }
        }

        #[test]
        fn prop_converted_key_ends_with_pdf(filename in "[a-zA-Z0-9_ ]{0,20}(\\.[a-zA-Z0-9]{1,5})?") {
            let key = source_key(FileId::new(), &filename);
            let converted = converted_key(&key);
            prop_assert!(converted.ends_with(".pdf"));
            prop_assert_eq!(
                Path::new(&converted).file_stem(),
                Path::new(&key).file_stem()
            );
        }
    }
}
