//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache store selection, and the Axum server
//! lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheStore, MemoryStore, RedisStore};
use crate::infrastructure::persistence::PgPostRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations
/// - Redis cache store (or the in-process store as fallback)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or the server
/// bind fail. A Redis connection failure is not fatal: the service degrades
/// to the in-process store and logs a warning.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store: Arc<dyn CacheStore> = if let Some(redis_url) = &config.redis_url {
        match RedisStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache store: Redis");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {e}. Using in-process store.");
                Arc::new(MemoryStore::new())
            }
        }
    } else {
        tracing::info!("Cache store: in-process (no REDIS_URL)");
        Arc::new(MemoryStore::new())
    };

    let repository = Arc::new(PgPostRepository::new(Arc::new(pool)));

    let state = AppState::new(
        repository,
        store,
        config.cache_invalidation,
        config.base_url.clone(),
        config.admin_token.clone(),
        config.public_page_size,
        config.admin_page_size,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
