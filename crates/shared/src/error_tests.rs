use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::Validation("Filename is required".into()), 400)]
#[case(AppError::NotFound("File not found".into()), 404)]
#[case(AppError::UnsupportedFormat(".exe".into()), 500)]
#[case(AppError::Conversion("soffice exited".into()), 500)]
#[case(AppError::Storage("connection refused".into()), 500)]
#[case(AppError::Internal("boom".into()), 500)]
fn test_app_error_status_codes(#[case] error: AppError, #[case] status: u16) {
    assert_eq!(error.status_code(), status);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(AppError::NotFound("test".into()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::UnsupportedFormat("test".into()).error_code(),
        "UNSUPPORTED_FORMAT"
    );
    assert_eq!(
        AppError::Conversion("test".into()).error_code(),
        "CONVERSION_ERROR"
    );
    assert_eq!(AppError::Storage("test".into()).error_code(), "STORAGE_ERROR");
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_app_error_display() {
    // Client-facing messages are passed through untouched.
    assert_eq!(
        format!("{}", AppError::NotFound("File not found".into())),
        "File not found"
    );
    assert_eq!(
        format!("{}", AppError::Validation("File ID is required".into())),
        "File ID is required"
    );
    assert_eq!(
        format!("{}", AppError::UnsupportedFormat("a.exe".into())),
        "Unsupported format: a.exe"
    );
    assert_eq!(
        format!("{}", AppError::Storage("msg".into())),
        "Storage error: msg"
    );
}
