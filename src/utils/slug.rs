//! Short link slug generation and validation.
//!
//! A slug is 6 bytes from the operating system RNG, hex-encoded to 12
//! lowercase characters, and is embedded in short links as
//! `{base_url}/?u={slug}`.

use regex::Regex;
use std::sync::LazyLock;

/// Number of random bytes per slug.
pub const SLUG_BYTES: usize = 6;

/// Length of an encoded slug.
pub const SLUG_LEN: usize = SLUG_BYTES * 2;

/// Query parameter carrying the slug in a short link.
pub const SLUG_PARAM: &str = "u";

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{12}$").expect("slug regex is valid"));

/// Generates a random 12-character lowercase hex slug.
///
/// # Errors
///
/// Returns the RNG error if the system random source is unavailable.
pub fn generate_slug() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; SLUG_BYTES];
    getrandom::fill(&mut buffer)?;
    Ok(hex::encode(buffer))
}

/// Returns true if `slug` is exactly 12 lowercase hex characters.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Prefix shared by every short link issued under `base_url`.
pub fn short_link_prefix(base_url: &str) -> String {
    format!("{}/?{}=", base_url.trim_end_matches('/'), SLUG_PARAM)
}

/// Builds the short link for `slug` under `base_url`.
///
/// ```ignore
/// assert_eq!(compose_short_url("https://sho.rt", "0a1b2c3d4e5f"), "https://sho.rt/?u=0a1b2c3d4e5f");
/// ```
pub fn compose_short_url(base_url: &str, slug: &str) -> String {
    format!("{}{}", short_link_prefix(base_url), slug)
}
