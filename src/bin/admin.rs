//! CLI administration tool for shorturl-api.
//!
//! Runs shorten/resolve against the configured database and performs database
//! maintenance without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Shorten or resolve a URL
//! cargo run --bin admin -- shorten https://example.com/very/long/path
//! cargo run --bin admin -- resolve "https://sho.rt/?u=0a1b2c3d4e5f"
//! ```
//!
//! # Environment Variables
//!
//! - `DB_URL` / `DATABASE_URL` (or `DB_HOST`, `DB_USER`, ...): PostgreSQL connection
//! - `BASE_URL`: required by `shorten` and `resolve`

use shorturl_api::application::services::UrlService;
use shorturl_api::config::Config;
use shorturl_api::domain::repositories::UrlRepository;
use shorturl_api::infrastructure::persistence::PgUrlRepository;
use shorturl_api::infrastructure::persistence::pool::migrate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorturl-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Shorten a URL
    Shorten {
        /// The original URL
        url: String,
    },

    /// Resolve an original URL or a short link
    Resolve {
        /// Original URL or short link
        query: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Shorten { url } => handle_shorten(&pool, &url).await?,
        Commands::Resolve { query } => handle_resolve(&pool, &query).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds the service against `pool` using `BASE_URL`.
fn url_service(pool: &PgPool) -> Result<UrlService<dyn UrlRepository>> {
    let base_url = std::env::var("BASE_URL").context("BASE_URL must be set")?;
    let repository: Arc<dyn UrlRepository> =
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    Ok(UrlService::new(repository, base_url))
}

/// Displays the number of stored links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repository = PgUrlRepository::new(Arc::new(pool.clone()));
    let links_count = repository.count().await.context("Failed to count links")?;

    let latest: Option<(String, chrono::DateTime<chrono::Utc>)> =
        sqlx::query_as("SELECT shortened, created_at FROM urls ORDER BY id DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    println!(
        "  Links:       {}",
        links_count.to_string().bright_green().bold()
    );
    if let Some((shortened, created_at)) = latest {
        println!(
            "  Latest:      {} {}",
            shortened.cyan(),
            created_at.to_rfc3339().bright_black()
        );
    }
    println!();

    Ok(())
}

/// Shortens `url` and prints the short link.
async fn handle_shorten(pool: &PgPool, url: &str) -> Result<()> {
    let service = url_service(pool)?;

    let shortened = service
        .shorten(url)
        .await
        .context("Couldn't create shortened URL")?;

    if shortened.created {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "ℹ️  Short link already exists".yellow());
    }
    println!("  Original: {}", shortened.pair.original.cyan());
    println!("  Short:    {}", shortened.pair.shortened.bright_yellow().bold());

    Ok(())
}

/// Resolves `query` and prints the original URL.
async fn handle_resolve(pool: &PgPool, query: &str) -> Result<()> {
    let service = url_service(pool)?;

    let pair = service
        .resolve(query)
        .await
        .context("Error in attempting to find shortened URL")?;

    println!("  Original: {}", pair.original.cyan());
    println!("  Short:    {}", pair.shortened.bright_yellow());
    println!(
        "  Created:  {}",
        pair.created_at.to_rfc3339().bright_black()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());

            let links_count = PgUrlRepository::new(Arc::new(pool.clone()))
                .count()
                .await
                .context("Failed to count links (are migrations applied?)")?;
            println!("  Stored links: {}", links_count.to_string().bright_green());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            migrate(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
