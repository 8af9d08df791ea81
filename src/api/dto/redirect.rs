//! DTO for the short link landing endpoint.

use serde::Deserialize;

/// Query parameters of an issued short link (`/?u={slug}`).
#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    pub u: Option<String>,
}
