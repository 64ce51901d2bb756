//! Core logic for Docview.
//!
//! This crate contains the upload/convert/preview orchestration with ZERO web
//! dependencies. Handlers in the api crate call into the services here.
//!
//! # Modules
//!
//! - `storage` - S3-compatible object store client
//! - `keys` - Object key derivation
//! - `conversion` - Office-to-PDF conversion via LibreOffice
//! - `upload` - Upload record store and upload/preview URL issuance
//! - `preview` - Convert-or-serve-cached orchestration

pub mod conversion;
pub mod keys;
pub mod preview;
pub mod storage;
pub mod upload;
