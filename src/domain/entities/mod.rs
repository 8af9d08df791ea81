//! Core domain entities.
//!
//! - [`UrlPair`] - A stored mapping between an original URL and its short link
//! - [`NewUrlPair`] - Input for creating a pair
//! - [`InsertOutcome`] - Result of an atomic insert attempt

pub mod url_pair;

pub use url_pair::{InsertOutcome, NewUrlPair, UrlPair};
