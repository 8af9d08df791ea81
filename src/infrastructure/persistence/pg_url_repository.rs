//! PostgreSQL implementation of the URL pair repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{InsertOutcome, NewUrlPair, UrlPair};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::{UniqueViolation, unique_violation};

/// PostgreSQL repository for URL pairs.
///
/// Uses bound parameters for every query. Uniqueness of both columns is
/// enforced by the `urls` table constraints, which makes [`UrlRepository::insert`]
/// atomic with respect to concurrent callers.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_pair(row: &PgRow) -> Result<UrlPair, sqlx::Error> {
    Ok(UrlPair::new(
        row.try_get("id")?,
        row.try_get("original")?,
        row.try_get("shortened")?,
        row.try_get("created_at")?,
    ))
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlPair>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, original, shortened, created_at
            FROM urls
            WHERE original = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(original)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_pair).transpose()?)
    }

    async fn find_by_shortened(&self, shortened: &str) -> Result<Option<UrlPair>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, original, shortened, created_at
            FROM urls
            WHERE shortened = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(shortened)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_pair).transpose()?)
    }

    async fn insert(&self, new_pair: NewUrlPair) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (original, shortened)
            VALUES ($1, $2)
            RETURNING id, original, shortened, created_at
            "#,
        )
        .bind(&new_pair.original)
        .bind(&new_pair.shortened)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Created(row_to_pair(&row)?)),
            Err(e) => match unique_violation(&e) {
                Some(UniqueViolation::Original) => {
                    debug!(original = %new_pair.original, "insert rejected: original exists");
                    Ok(InsertOutcome::OriginalExists)
                }
                Some(UniqueViolation::Shortened) => {
                    debug!(shortened = %new_pair.shortened, "insert rejected: shortened taken");
                    Ok(InsertOutcome::ShortenedTaken)
                }
                None => Err(e.into()),
            },
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
