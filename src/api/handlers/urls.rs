//! Handlers for the shorten and resolve endpoints.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::urls::{ResolveParams, ResolveResponse, ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short link for a URL, creating it on first use.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "original": "https://example.com/very/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "url": "https://sho.rt/?u=0a1b2c3d4e5f" }
/// ```
///
/// - **201 Created**: a new short link was issued
/// - **200 OK**: the URL was already shortened; the existing link is returned
///
/// # Errors
///
/// Returns 400 Bad Request for a missing, empty or malformed `original`.
/// Returns 500 Internal Server Error on storage failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let shortened = state
        .url_service
        .shorten(&payload.original)
        .await
        .map_err(|e| e.context("Couldn't create shortened URL"))?;

    let status = if shortened.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ShortenResponse {
            url: shortened.pair.shortened,
        }),
    ))
}

/// Resolves an original URL or a short link to the original URL.
///
/// # Endpoint
///
/// `GET /api/urls?original={value}`
///
/// # Response
///
/// ```json
/// { "original": "https://example.com/very/long/path" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `original` is missing or empty.
/// Returns 404 Not Found if no stored pair matches.
/// Returns 500 Internal Server Error on storage failures.
pub async fn resolve_handler(
    State(state): State<AppState>,
    params: Result<Query<ResolveParams>, QueryRejection>,
) -> Result<Json<ResolveResponse>, AppError> {
    let Query(params) = params?;
    params.validate()?;

    let pair = state
        .url_service
        .resolve(&params.original)
        .await
        .map_err(|e| e.context("Error in attempting to find shortened URL"))?;

    Ok(Json(ResolveResponse {
        original: pair.original,
    }))
}
