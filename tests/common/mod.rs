#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use shorturl_api::domain::repositories::UrlRepository;
use shorturl_api::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
use shorturl_api::routes::router;
use shorturl_api::state::AppState;

pub const BASE_URL: &str = "https://sho.rt";

pub fn create_memory_state() -> AppState {
    let repository: Arc<dyn UrlRepository> = Arc::new(InMemoryUrlRepository::new());
    AppState::new(repository, BASE_URL)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    AppState::new(repository, BASE_URL)
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app: Router = router(state);
    TestServer::new(app).unwrap()
}

pub async fn insert_pair(pool: &PgPool, original: &str, shortened: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO urls (original, shortened) VALUES ($1, $2) RETURNING id")
        .bind(original)
        .bind(shortened)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Returns the slug of a short link issued under [`BASE_URL`].
pub fn slug_of(short_url: &str) -> &str {
    short_url
        .strip_prefix("https://sho.rt/?u=")
        .expect("short link should use the test base URL")
}
