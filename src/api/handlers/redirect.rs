//! Handler for the short link landing URL.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::api::dto::redirect::RedirectParams;
use crate::application::services::url_service::NOT_FOUND_MESSAGE;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an issued short link to its original URL.
///
/// # Endpoint
///
/// `GET /?u={slug}`
///
/// Short links have the form `{BASE_URL}/?u={slug}`, so this is where they
/// land when `BASE_URL` points at this service.
///
/// # Errors
///
/// Returns 404 Not Found if `u` is missing, malformed or unknown.
/// Returns 400 Bad Request if the query string cannot be parsed.
pub async fn redirect_handler(
    State(state): State<AppState>,
    params: Result<Query<RedirectParams>, QueryRejection>,
) -> Result<Redirect, AppError> {
    let Query(params) = params?;

    let Some(slug) = params.u else {
        return Err(AppError::not_found(
            NOT_FOUND_MESSAGE,
            json!({ "reason": "missing slug" }),
        ));
    };

    let pair = state.url_service.resolve_slug(&slug).await?;
    debug!(slug = %slug, original = %pair.original, "redirecting");

    Ok(Redirect::temporary(&pair.original))
}
