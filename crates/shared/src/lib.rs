//! Shared types, errors, and configuration for Docview.
//!
//! This crate provides common types used across all other crates:
//! - Typed file identifiers
//! - The office-format allow-list and its LibreOffice export filters
//! - Wire types for the upload/preview API
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DeliveryMode};
pub use error::AppError;
