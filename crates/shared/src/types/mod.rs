//! Common types used across the application.

pub mod api;
pub mod format;
pub mod id;

pub use api::{
    ApiResponse, PreviewUrlRequest, PreviewUrlResponse, UploadUrlRequest, UploadUrlResponse,
};
pub use format::OfficeFormat;
pub use id::FileId;
