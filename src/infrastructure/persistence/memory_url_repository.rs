//! In-memory implementation of the URL pair repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{InsertOutcome, NewUrlPair, UrlPair};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    pairs: Vec<UrlPair>,
    by_original: HashMap<String, usize>,
    by_shortened: HashMap<String, usize>,
}

/// Process-local repository backed by a mutex-guarded vector with one index
/// per column.
///
/// Both uniqueness checks and the insert happen under a single lock, so
/// concurrent inserts of the same original collapse onto one pair just like
/// the PostgreSQL constraints do. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    store: Mutex<Store>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AppError> {
        self.store.lock().map_err(|e| {
            AppError::internal("Storage lock poisoned", json!({ "reason": e.to_string() }))
        })
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlPair>, AppError> {
        let store = self.lock()?;
        Ok(store
            .by_original
            .get(original)
            .map(|&idx| store.pairs[idx].clone()))
    }

    async fn find_by_shortened(&self, shortened: &str) -> Result<Option<UrlPair>, AppError> {
        let store = self.lock()?;
        Ok(store
            .by_shortened
            .get(shortened)
            .map(|&idx| store.pairs[idx].clone()))
    }

    async fn insert(&self, new_pair: NewUrlPair) -> Result<InsertOutcome, AppError> {
        let mut store = self.lock()?;

        if store.by_original.contains_key(&new_pair.original) {
            return Ok(InsertOutcome::OriginalExists);
        }
        if store.by_shortened.contains_key(&new_pair.shortened) {
            return Ok(InsertOutcome::ShortenedTaken);
        }

        let idx = store.pairs.len();
        let pair = UrlPair::new(
            idx as i64 + 1,
            new_pair.original,
            new_pair.shortened,
            Utc::now(),
        );

        store.by_original.insert(pair.original.clone(), idx);
        store.by_shortened.insert(pair.shortened.clone(), idx);
        store.pairs.push(pair.clone());

        Ok(InsertOutcome::Created(pair))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.pairs.len() as i64)
    }

    async fn health_check(&self) -> bool {
        self.store.lock().is_ok()
    }
}
