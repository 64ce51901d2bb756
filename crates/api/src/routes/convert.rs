//! Conversion endpoint.

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, error::ConvertError};
use docview_core::preview::{CONVERT_PATH, PDF_CONTENT_TYPE, PreviewPayload};

const CONTENT_TRANSFER_ENCODING: HeaderName = HeaderName::from_static("content-transfer-encoding");

/// Query string of the conversion endpoint.
#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    /// Object key of the uploaded source document.
    #[serde(default)]
    pub key: Option<String>,
}

/// Creates the conversion route.
pub fn routes() -> Router<AppState> {
    Router::new().route(CONVERT_PATH, get(convert))
}

/// GET `/convert?key=<objectKey>`
/// Serve the PDF for `key`, converting the source on first request.
async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Response, ConvertError> {
    let key = query.key.unwrap_or_default();
    debug!(key = %key, delivery = state.previews.delivery().as_str(), "Preview requested");

    let response = match state.previews.render(&key).await? {
        PreviewPayload::Pdf(pdf) => ([(header::CONTENT_TYPE, PDF_CONTENT_TYPE)], pdf).into_response(),
        PreviewPayload::Base64(body) => (
            [
                (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
                (CONTENT_TRANSFER_ENCODING, "base64"),
            ],
            body,
        )
            .into_response(),
        PreviewPayload::Redirect(presigned) => {
            (StatusCode::FOUND, [(header::LOCATION, presigned.url)]).into_response()
        }
    };

    Ok(response)
}
