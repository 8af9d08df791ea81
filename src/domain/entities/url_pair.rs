//! URL pair entity representing an original URL and its short link.

use chrono::{DateTime, Utc};

/// A stored mapping between a user-supplied URL and the short link issued for it.
///
/// Pairs are created once and never updated or deleted. `id` follows insertion
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlPair {
    pub id: i64,
    pub original: String,
    pub shortened: String,
    pub created_at: DateTime<Utc>,
}

impl UrlPair {
    /// Creates a new UrlPair instance.
    pub fn new(id: i64, original: String, shortened: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original,
            shortened,
            created_at,
        }
    }
}

/// Input data for creating a new pair.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlPair {
    pub original: String,
    pub shortened: String,
}

/// Result of an atomic insert.
///
/// Unique violations are reported as values so callers can tell a lost race
/// on `original` apart from a slug collision on `shortened`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The pair was stored.
    Created(UrlPair),
    /// Another pair already holds this original URL.
    OriginalExists,
    /// Another pair already holds this short link.
    ShortenedTaken,
}
