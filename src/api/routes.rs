//! API route configuration.

use crate::api::handlers::{resolve_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// URL pair routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /urls` - Shorten a URL (201 created, 200 existing)
/// - `GET  /urls?original=...` - Resolve an original URL or short link
pub fn url_routes() -> Router<AppState> {
    Router::new().route("/urls", get(resolve_handler).post(shorten_handler))
}
