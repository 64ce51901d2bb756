//! Client side of the upload and preview flow.
//!
//! This crate provides:
//! - [`Flow`], the screen state machine (`NoFile` through `PreviewShown`)
//! - [`PreviewClient`], the HTTP calls against the API and the presigned URL
//! - [`Session`], which drives the state machine with the HTTP client

pub mod client;
pub mod error;
pub mod session;
pub mod state;

pub use client::PreviewClient;
pub use error::{ClientError, ClientResult};
pub use session::Session;
pub use state::{Flow, FlowState, SelectedFile};
