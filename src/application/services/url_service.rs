//! Shorten and resolve operations over stored URL pairs.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{InsertOutcome, NewUrlPair, UrlPair};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::slug::{compose_short_url, generate_slug, is_valid_slug, short_link_prefix};

/// Slug attempts before giving up on a create.
const MAX_SLUG_ATTEMPTS: usize = 8;

/// User-facing message for unknown links.
pub const NOT_FOUND_MESSAGE: &str = "That link is not valid :(";

/// Result of a shorten call.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortened {
    pub pair: UrlPair,
    /// `true` when this call stored the pair, `false` when it already existed.
    pub created: bool,
}

impl Shortened {
    fn created(pair: UrlPair) -> Self {
        Self {
            pair,
            created: true,
        }
    }

    fn existing(pair: UrlPair) -> Self {
        Self {
            pair,
            created: false,
        }
    }
}

/// Service for creating and resolving short links.
///
/// Values starting with this service's short-link prefix
/// (`{base_url}/?u=`) are treated as short links and are only ever matched
/// against the shortened column; every other value is matched against the
/// original column. Originals in short-link form are never stored, so the two
/// namespaces cannot overlap.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    base_url: String,
    prefix: String,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new service issuing short links under `base_url`.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let prefix = short_link_prefix(&base_url);
        Self {
            repository,
            base_url,
            prefix,
        }
    }

    /// Returns true if `value` has the form of a short link issued here.
    pub fn is_short_link(&self, value: &str) -> bool {
        value.starts_with(&self.prefix)
    }

    /// Returns the short link for `slug`.
    pub fn short_url(&self, slug: &str) -> String {
        compose_short_url(&self.base_url, slug)
    }

    /// Returns the short link for `original`, creating it on first use.
    ///
    /// # Idempotence
    ///
    /// Every call with the same `original` returns the same short link, also
    /// under concurrency: the storage layer rejects a second pair for the same
    /// original and the loser re-reads the winner's pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original` is a short link that
    /// was never issued.
    ///
    /// Returns [`AppError::Internal`] on storage errors or if no free slug is
    /// found after a bounded number of attempts.
    pub async fn shorten(&self, original: &str) -> Result<Shortened, AppError> {
        if self.is_short_link(original) {
            return match self.repository.find_by_shortened(original).await? {
                Some(pair) => {
                    debug!(shortened = %pair.shortened, "value is an existing short link");
                    Ok(Shortened::existing(pair))
                }
                None => Err(AppError::bad_request(
                    "Cannot shorten an unknown short link",
                    json!({ "original": original }),
                )),
            };
        }

        if let Some(pair) = self.repository.find_by_original(original).await? {
            debug!(shortened = %pair.shortened, "short link already exists");
            return Ok(Shortened::existing(pair));
        }

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = generate_slug().map_err(|e| {
                AppError::internal(
                    "Failed to generate random slug",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            let new_pair = NewUrlPair {
                original: original.to_string(),
                shortened: self.short_url(&slug),
            };

            match self.repository.insert(new_pair).await? {
                InsertOutcome::Created(pair) => {
                    info!(id = pair.id, shortened = %pair.shortened, "short link created");
                    return Ok(Shortened::created(pair));
                }
                InsertOutcome::OriginalExists => {
                    warn!(attempt, "concurrent shorten won the race, reading its pair");
                    return self
                        .repository
                        .find_by_original(original)
                        .await?
                        .map(Shortened::existing)
                        .ok_or_else(|| {
                            AppError::internal(
                                "Stored pair disappeared after conflict",
                                json!({ "original": original }),
                            )
                        });
                }
                InsertOutcome::ShortenedTaken => {
                    warn!(attempt, "slug collision, retrying");
                }
            }
        }

        Err(AppError::internal(
            "Failed to generate unique slug",
            json!({ "reason": "Too many collisions", "attempts": MAX_SLUG_ATTEMPTS }),
        ))
    }

    /// Returns the pair matching `query`, given either its original URL or
    /// its short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matches.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, query: &str) -> Result<UrlPair, AppError> {
        let found = if self.is_short_link(query) {
            self.repository.find_by_shortened(query).await?
        } else {
            self.repository.find_by_original(query).await?
        };

        found.ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE, json!({ "query": query })))
    }

    /// Returns the pair whose short link carries `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is malformed or unknown.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve_slug(&self, slug: &str) -> Result<UrlPair, AppError> {
        if !is_valid_slug(slug) {
            return Err(AppError::not_found(
                NOT_FOUND_MESSAGE,
                json!({ "slug": slug }),
            ));
        }

        self.repository
            .find_by_shortened(&self.short_url(slug))
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE, json!({ "slug": slug })))
    }

    /// Returns the number of stored pairs.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Returns true if the repository answers queries.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use chrono::Utc;
    use mockall::Sequence;

    const BASE_URL: &str = "https://sho.rt";
    const ORIGINAL: &str = "https://example.com/very/long/path";
    const SHORT: &str = "https://sho.rt/?u=0a1b2c3d4e5f";

    fn test_pair(id: i64, original: &str, shortened: &str) -> UrlPair {
        UrlPair::new(id, original.to_string(), shortened.to_string(), Utc::now())
    }

    fn service(repo: MockUrlRepository) -> UrlService<MockUrlRepository> {
        UrlService::new(Arc::new(repo), BASE_URL)
    }

    #[tokio::test]
    async fn test_shorten_creates_new_pair() {
        let mut repo = MockUrlRepository::new();

        repo.expect_find_by_original()
            .withf(|value| value == ORIGINAL)
            .times(1)
            .returning(|_| Ok(None));

        repo.expect_insert()
            .withf(|new_pair| {
                let slug = new_pair.shortened.strip_prefix("https://sho.rt/?u=");
                new_pair.original == ORIGINAL && slug.is_some_and(is_valid_slug)
            })
            .times(1)
            .returning(|new_pair| {
                Ok(InsertOutcome::Created(test_pair(
                    1,
                    &new_pair.original,
                    &new_pair.shortened,
                )))
            });

        let result = service(repo).shorten(ORIGINAL).await.unwrap();

        assert!(result.created);
        assert_eq!(result.pair.original, ORIGINAL);
        assert!(result.pair.shortened.starts_with("https://sho.rt/?u="));
    }

    #[tokio::test]
    async fn test_shorten_returns_existing_pair() {
        let mut repo = MockUrlRepository::new();

        let existing = test_pair(5, ORIGINAL, SHORT);
        repo.expect_find_by_original()
            .withf(|value| value == ORIGINAL)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_insert().times(0);

        let result = service(repo).shorten(ORIGINAL).await.unwrap();

        assert!(!result.created);
        assert_eq!(result.pair.id, 5);
        assert_eq!(result.pair.shortened, SHORT);
    }

    #[tokio::test]
    async fn test_shorten_existing_short_link_returns_itself() {
        let mut repo = MockUrlRepository::new();

        let existing = test_pair(5, ORIGINAL, SHORT);
        repo.expect_find_by_shortened()
            .withf(|value| value == SHORT)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_original().times(0);
        repo.expect_insert().times(0);

        let result = service(repo).shorten(SHORT).await.unwrap();

        assert!(!result.created);
        assert_eq!(result.pair.shortened, SHORT);
        assert_eq!(result.pair.original, ORIGINAL);
    }

    #[tokio::test]
    async fn test_shorten_unknown_short_link_is_rejected() {
        let mut repo = MockUrlRepository::new();

        repo.expect_find_by_shortened()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert().times(0);

        let result = service(repo).shorten(SHORT).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_retries_on_slug_collision() {
        let mut repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        repo.expect_find_by_original()
            .times(1)
            .returning(|_| Ok(None));

        repo.expect_insert()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(InsertOutcome::ShortenedTaken));

        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_pair| {
                Ok(InsertOutcome::Created(test_pair(
                    3,
                    &new_pair.original,
                    &new_pair.shortened,
                )))
            });

        let result = service(repo).shorten(ORIGINAL).await.unwrap();

        assert!(result.created);
        assert_eq!(result.pair.id, 3);
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_max_attempts() {
        let mut repo = MockUrlRepository::new();

        repo.expect_find_by_original()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(MAX_SLUG_ATTEMPTS)
            .returning(|_| Ok(InsertOutcome::ShortenedTaken));

        let result = service(repo).shorten(ORIGINAL).await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
        assert!(err.to_string().contains("unique slug"));
    }

    #[tokio::test]
    async fn test_shorten_lost_race_returns_winner() {
        let mut repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        repo.expect_find_by_original()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(InsertOutcome::OriginalExists));

        let winner = test_pair(9, ORIGINAL, SHORT);
        repo.expect_find_by_original()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(winner.clone())));

        let result = service(repo).shorten(ORIGINAL).await.unwrap();

        assert!(!result.created);
        assert_eq!(result.pair.id, 9);
        assert_eq!(result.pair.shortened, SHORT);
    }

    #[tokio::test]
    async fn test_shorten_propagates_storage_error() {
        let mut repo = MockUrlRepository::new();

        repo.expect_find_by_original().times(1).returning(|_| {
            Err(AppError::internal(
                "Database error",
                json!({ "reason": "pool timed out" }),
            ))
        });
        repo.expect_insert().times(0);

        let result = service(repo).shorten(ORIGINAL).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_by_original() {
        let mut repo = MockUrlRepository::new();

        let existing = test_pair(1, ORIGINAL, SHORT);
        repo.expect_find_by_original()
            .withf(|value| value == ORIGINAL)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_shortened().times(0);

        let pair = service(repo).resolve(ORIGINAL).await.unwrap();

        assert_eq!(pair.original, ORIGINAL);
    }

    #[tokio::test]
    async fn test_resolve_by_short_link() {
        let mut repo = MockUrlRepository::new();

        let existing = test_pair(1, ORIGINAL, SHORT);
        repo.expect_find_by_shortened()
            .withf(|value| value == SHORT)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_original().times(0);

        let pair = service(repo).resolve(SHORT).await.unwrap();

        assert_eq!(pair.original, ORIGINAL);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockUrlRepository::new();

        repo.expect_find_by_original()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repo).resolve("https://never-submitted.com").await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_resolve_slug() {
        let mut repo = MockUrlRepository::new();

        let existing = test_pair(1, ORIGINAL, SHORT);
        repo.expect_find_by_shortened()
            .withf(|value| value == SHORT)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let pair = service(repo).resolve_slug("0a1b2c3d4e5f").await.unwrap();

        assert_eq!(pair.original, ORIGINAL);
    }

    #[tokio::test]
    async fn test_resolve_slug_rejects_malformed_slug() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_shortened().times(0);

        let result = service(repo).resolve_slug("not-a-slug").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_is_short_link() {
        let service = service(MockUrlRepository::new());

        assert!(service.is_short_link(SHORT));
        assert!(!service.is_short_link(ORIGINAL));
        assert!(!service.is_short_link("https://sho.rt/other"));
        assert_eq!(service.short_url("0a1b2c3d4e5f"), SHORT);
    }
}
