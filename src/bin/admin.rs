//! CLI administration tool for quillpress.
//!
//! Provides commands for cache maintenance and database diagnostics
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Warm the hottest cache entries
//! cargo run --bin admin -- cache warmup
//!
//! # Flush the entire cache store (asks for confirmation)
//! cargo run --bin admin -- cache clear
//!
//! # Show cache configuration and post statistics
//! cargo run --bin admin -- cache stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `REDIS_URL` (optional): shared cache store; without it the commands
//!   run against a private in-process store, which only makes sense for
//!   dry runs
//! - `CACHE_INVALIDATION` (optional): `targeted` (default) or `flush`

use quillpress::application::cache::{CacheWarmer, InvalidationMode, Invalidator, PostCache};
use quillpress::application::services::{PostService, StatsService};
use quillpress::infrastructure::cache::{CacheStore, MemoryStore, RedisStore};
use quillpress::infrastructure::persistence::PgPostRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing quillpress.
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
    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Cache maintenance subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Populate the hottest cache entries
    Warmup,

    /// Flush the entire cache store
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show cache configuration and post statistics
    Stats,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Cache { action } => handle_cache_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches cache maintenance commands.
async fn handle_cache_action(action: CacheAction, pool: &PgPool) -> Result<()> {
    let store = connect_store().await;
    let cache = PostCache::new(store);

    let mode = match std::env::var("CACHE_INVALIDATION") {
        Ok(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        Err(_) => InvalidationMode::default(),
    };

    let repository = Arc::new(PgPostRepository::new(Arc::new(pool.clone())));
    let invalidator = Invalidator::new(cache.clone(), mode);
    let posts = Arc::new(PostService::new(
        repository.clone(),
        cache.clone(),
        invalidator.clone(),
    ));
    let stats = Arc::new(StatsService::new(repository, cache.clone()));

    match action {
        CacheAction::Warmup => {
            warmup(CacheWarmer::new(posts, stats, cache)).await?;
        }
        CacheAction::Clear { yes } => {
            clear(&invalidator, yes).await?;
        }
        CacheAction::Stats => {
            show_stats(&cache, &invalidator, &stats).await?;
        }
    }

    Ok(())
}

/// Connects the shared cache store, falling back to in-process.
async fn connect_store() -> Arc<dyn CacheStore> {
    match std::env::var("REDIS_URL") {
        Ok(url) => match RedisStore::connect(&url).await {
            Ok(redis) => Arc::new(redis),
            Err(e) => {
                println!(
                    "{}",
                    format!("⚠️  Redis unavailable ({e}); using a private in-process store")
                        .yellow()
                );
                Arc::new(MemoryStore::new())
            }
        },
        Err(_) => {
            println!(
                "{}",
                "⚠️  REDIS_URL not set; using a private in-process store (dry run only)".yellow()
            );
            Arc::new(MemoryStore::new())
        }
    }
}

/// Runs the warm-up and reports what was populated.
async fn warmup(warmer: CacheWarmer) -> Result<()> {
    println!("{}", "🔥 Cache Warm-up".bright_blue().bold());
    println!();

    let report = warmer
        .warm_up()
        .await
        .map_err(|e| anyhow::anyhow!("Warm-up failed: {}", e))?;

    for entry in &report.warmed {
        println!("  {} {}", "✔".green(), entry);
    }

    println!();
    println!(
        "{}",
        format!("✅ Warmed {} entries in {} ms", report.warmed.len(), report.elapsed_ms)
            .green()
            .bold()
    );
    println!();

    Ok(())
}

/// Flushes the whole store after confirmation.
async fn clear(invalidator: &Invalidator, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Cache Clear".bright_blue().bold());
    println!();
    println!("  This flushes every cached entry, including the generation");
    println!("  counter and the warm-up marker.");
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Flush the entire cache store?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    invalidator.flush_all().await;

    println!();
    println!("{}", "✅ Cache flushed".green().bold());
    println!();

    Ok(())
}

/// Displays cache configuration and the current statistics snapshot.
async fn show_stats(
    cache: &PostCache,
    invalidator: &Invalidator,
    stats: &StatsService,
) -> Result<()> {
    println!("{}", "📊 Cache & Post Statistics".bright_blue().bold());
    println!();

    println!("  Driver:       {}", cache.driver().cyan());
    println!(
        "  Invalidation: {}",
        invalidator.mode().as_str().cyan()
    );

    match cache.last_warmup().await {
        Some(at) => println!(
            "  Last warm-up: {}",
            at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_white()
        ),
        None => println!("  Last warm-up: {}", "never".bright_black()),
    }

    println!();

    // Read straight from the database so the numbers are authoritative even
    // when the cached snapshot is stale.
    let snapshot = stats
        .snapshot_uncached()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Posts:            {}",
        snapshot.total_posts.to_string().bright_green().bold()
    );
    println!(
        "  Authors:          {}",
        snapshot.total_authors.to_string().bright_green().bold()
    );
    println!(
        "  Posts this month: {}",
        snapshot.posts_this_month.to_string().bright_green().bold()
    );

    match snapshot.latest_post_date {
        Some(date) => println!(
            "  Latest post:      {}",
            date.format("%Y-%m-%d %H:%M").to_string().bright_white()
        ),
        None => println!("  Latest post:      {}", "none".bright_black()),
    }

    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
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
