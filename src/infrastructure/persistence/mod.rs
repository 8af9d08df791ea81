//! Repository implementations.
//!
//! - [`PgUrlRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryUrlRepository`] - Process-local storage for development and tests
//! - [`pool`] - Connection pool setup with startup retry

pub mod memory_url_repository;
pub mod pg_url_repository;
pub mod pool;

pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
