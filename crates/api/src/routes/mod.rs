//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod convert;
pub mod health;
pub mod uploads;

/// Creates the router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/api", uploads::routes())
        .merge(convert::routes())
}
