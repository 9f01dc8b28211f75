//! Redis-backed cache store implementation.

use super::store::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, error, info};

/// Redis cache store.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Failed commands after connect surface as
/// [`CacheError::Operation`]; callers treat those fail-open (a failed read
/// is a miss, a failed write is dropped with a warning).
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "blog:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(Some(value)) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Err(CacheError::Operation(format!("GET {}: {}", key, e)))
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        match conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds).await {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
                Ok(())
            }
            Err(e) => Err(CacheError::Operation(format!("SET {}: {}", key, e))),
        }
    }

    async fn forget(&self, key: &str) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&full_key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache FORGET: {}", key);
                }
                Ok(())
            }
            Err(e) => Err(CacheError::Operation(format!("DEL {}: {}", key, e))),
        }
    }

    async fn flush(&self) -> CacheResult<()> {
        let mut conn = self.client.clone();

        // Deletes only keys under our prefix so an instance sharing the
        // Redis database with other applications does not wipe them out.
        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = conn
            .keys(&pattern)
            .await
            .map_err(|e| CacheError::Operation(format!("KEYS during flush: {}", e)))?;

        if keys.is_empty() {
            return Ok(());
        }

        match conn.del::<_, i64>(&keys).await {
            Ok(deleted) => {
                debug!("Cache FLUSH: {} entries removed", deleted);
                Ok(())
            }
            Err(e) => Err(CacheError::Operation(format!("DEL during flush: {}", e))),
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn driver(&self) -> &'static str {
        "redis"
    }
}
