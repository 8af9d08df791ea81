//! Repository trait for URL pair data access.

use crate::domain::entities::{InsertOutcome, NewUrlPair, UrlPair};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for stored URL pairs.
///
/// Lookups by the two columns are kept separate so the original and
/// shortened namespaces never shadow each other.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds the pair whose `original` equals `original`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlPair>, AppError>;

    /// Finds the pair whose `shortened` equals `shortened`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_shortened(&self, shortened: &str) -> Result<Option<UrlPair>, AppError>;

    /// Inserts a pair as a single atomic operation.
    ///
    /// A unique violation is not an error: it is reported as
    /// [`InsertOutcome::OriginalExists`] or [`InsertOutcome::ShortenedTaken`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on any other storage error.
    async fn insert(&self, new_pair: NewUrlPair) -> Result<InsertOutcome, AppError>;

    /// Counts stored pairs.
    async fn count(&self) -> Result<i64, AppError>;

    /// Returns true if the backing store answers queries.
    async fn health_check(&self) -> bool;
}
