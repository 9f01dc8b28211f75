//! Cache store trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store behind the post cache layer.
///
/// Values are opaque strings (the cache layer serializes to JSON before
/// storing). Implementations must be thread-safe. Callers treat every
/// operation as fail-open: an error is logged and the underlying query runs
/// against the data source instead, so a broken cache backend never breaks
/// a read path.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::cache::MemoryStore`] - in-process store, also
///   used as the fallback when Redis is not configured and as the test fake
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `Ok(None)` on a miss or when the entry has expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    ///
    /// Overwrites any existing entry. Concurrent writers racing on the same
    /// key are acceptable; the last write wins.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes a single entry. Removing an absent key is not an error.
    async fn forget(&self, key: &str) -> CacheResult<()>;

    /// Evicts every entry in the store, regardless of key.
    async fn flush(&self) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short name of the backend ("redis", "memory") for diagnostics.
    fn driver(&self) -> &'static str;
}
