//! DTOs for the shorten and resolve endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. A missing field is treated as empty and rejected.
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "original must be 1-2048 characters"))]
    #[validate(url(message = "Invalid URL format"))]
    pub original: String,
}

/// Response carrying the short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub url: String,
}

/// Query parameters for resolving a URL.
///
/// `original` may hold either an original URL or a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveParams {
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "original must be 1-2048 characters"))]
    pub original: String,
}

/// Response carrying the original URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub original: String,
}
