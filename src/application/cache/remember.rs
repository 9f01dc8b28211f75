//! Read-through cache wrapper.

use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::{keys, ttl};

/// Typed read-through facade over a [`CacheStore`].
///
/// Wraps every expensive query behind "get-or-compute-and-store": on a hit
/// the decoded value is returned, on a miss the producer runs and its result
/// is stored under the key with the dataset's TTL.
///
/// Two deliberate properties:
///
/// - **Fail-open.** A failed cache read, write, or decode never fails the
///   request; the producer result is returned uncached and the incident is
///   logged at warn.
/// - **No single-flight.** Concurrent misses on the same key each run the
///   producer and overwrite each other with the same result. That redundancy
///   is accepted for this workload.
#[derive(Clone)]
pub struct PostCache {
    store: Arc<dyn CacheStore>,
}

impl PostCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Returns the cached value under `key`, or runs `producer` and stores
    /// its result with `ttl`.
    pub async fn remember<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Ok(Some(raw)) = self.store.get(key).await {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    counter!("blog_cache_hits_total").increment(1);
                    return Ok(value);
                }
                Err(e) => {
                    // A schema change between releases can leave undecodable
                    // entries behind; drop them and recompute.
                    warn!("discarding undecodable cache entry {key}: {e}");
                    let _ = self.store.forget(key).await;
                }
            }
        }

        counter!("blog_cache_misses_total").increment(1);
        let value = producer().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.store.put(key, &raw, ttl).await {
                    warn!("cache write failed for {key}: {e}");
                }
            }
            Err(e) => warn!("cache encode failed for {key}: {e}"),
        }

        Ok(value)
    }

    /// Current generation of the parameterized key families.
    ///
    /// A missing or unparseable counter reads as generation 0, which is
    /// always safe: at worst it orphans entries that expire by TTL.
    pub async fn generation(&self) -> u64 {
        match self.store.get(keys::GENERATION_KEY).await {
            Ok(Some(raw)) => raw.parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Bumps the generation counter, orphaning every listing, popular, and
    /// view-fragment entry at once.
    ///
    /// Not atomic: two racing writers may both publish the same next value.
    /// The consequence is one fewer orphaning step, never stale reads beyond
    /// what a single bump already allows.
    pub async fn bump_generation(&self) {
        let next = self.generation().await.wrapping_add(1);
        if let Err(e) = self
            .store
            .put(keys::GENERATION_KEY, &next.to_string(), ttl::BOOKKEEPING)
            .await
        {
            warn!("failed to bump cache generation: {e}");
        }
        counter!("blog_cache_generation_bumps_total").increment(1);
    }

    /// Removes a single entry.
    pub async fn forget(&self, key: &str) {
        if let Err(e) = self.store.forget(key).await {
            warn!("cache forget failed for {key}: {e}");
        }
    }

    /// Evicts the whole store.
    pub async fn flush(&self) {
        if let Err(e) = self.store.flush().await {
            warn!("cache flush failed: {e}");
        }
    }

    /// Records the current time as the last warm-up moment.
    pub async fn record_warmup(&self, now: DateTime<Utc>) {
        if let Err(e) = self
            .store
            .put(keys::LAST_WARMUP_KEY, &now.to_rfc3339(), ttl::BOOKKEEPING)
            .await
        {
            warn!("failed to record warm-up time: {e}");
        }
    }

    /// Timestamp of the last warm-up, if one was recorded.
    pub async fn last_warmup(&self) -> Option<DateTime<Utc>> {
        match self.store.get(keys::LAST_WARMUP_KEY).await {
            Ok(Some(raw)) => DateTime::parse_from_rfc3339(&raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    pub fn driver(&self) -> &'static str {
        self.store.driver()
    }

    /// Raw store access for the response-fragment middleware, which caches
    /// opaque bodies rather than typed values.
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }
}
