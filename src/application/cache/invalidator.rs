//! Cache invalidation on post mutations.

use metrics::counter;
use std::str::FromStr;
use tracing::debug;

use super::{PostCache, keys};

/// Notification emitted by a write path after a successful commit.
///
/// Mutations signal the invalidator explicitly instead of hiding the cache
/// side effect inside the persistence lifecycle, so the coupling is visible
/// at the call site and absent from rejected writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostEvent {
    Created { id: i64 },
    Updated { id: i64 },
    Deleted { id: i64 },
}

impl PostEvent {
    pub fn post_id(&self) -> i64 {
        match *self {
            Self::Created { id } | Self::Updated { id } | Self::Deleted { id } => id,
        }
    }
}

/// Eviction strategy applied on every post mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationMode {
    /// Evict exactly the fixed keys (author roster, stats, the mutated
    /// post) and bump the generation counter to orphan the parameterized
    /// listing/popular/view keys. Default.
    #[default]
    Targeted,
    /// Evict the entire store on any mutation. Blunt but simple; kept as a
    /// documented fallback for backends where even the generation bump is
    /// unwanted. Under write-heavy load this degrades to no caching at all.
    Flush,
}

impl InvalidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Targeted => "targeted",
            Self::Flush => "flush",
        }
    }
}

impl FromStr for InvalidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "targeted" => Ok(Self::Targeted),
            "flush" => Ok(Self::Flush),
            other => Err(format!(
                "CACHE_INVALIDATION must be 'targeted' or 'flush', got '{other}'"
            )),
        }
    }
}

/// Discards stale entries after any post create/update/delete.
#[derive(Clone)]
pub struct Invalidator {
    cache: PostCache,
    mode: InvalidationMode,
}

impl Invalidator {
    pub fn new(cache: PostCache, mode: InvalidationMode) -> Self {
        Self { cache, mode }
    }

    pub fn mode(&self) -> InvalidationMode {
        self.mode
    }

    /// Handles one mutation event.
    ///
    /// After this returns, a read for any previously cached dataset sees
    /// current data: fixed keys are gone and parameterized keys are orphaned
    /// (targeted) or everything is gone (flush).
    pub async fn handle(&self, event: PostEvent) {
        counter!("blog_cache_invalidations_total").increment(1);
        debug!(?event, mode = ?self.mode, "invalidating post caches");

        match self.mode {
            InvalidationMode::Targeted => {
                self.cache.forget(keys::AUTHORS_KEY).await;
                self.cache.forget(keys::STATS_KEY).await;
                self.cache.forget(&keys::post_key(event.post_id())).await;
                self.cache.bump_generation().await;
            }
            InvalidationMode::Flush => {
                self.cache.flush().await;
            }
        }
    }

    /// Unconditional full flush, used by the operator `clear` command in
    /// both modes.
    pub async fn flush_all(&self) {
        self.cache.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{CacheStore, MemoryStore};
    use std::sync::Arc;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(60);

    async fn seeded_store() -> (Arc<MemoryStore>, PostCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = PostCache::new(store.clone());

        store.put(keys::AUTHORS_KEY, "[]", TTL).await.unwrap();
        store.put(keys::STATS_KEY, "{}", TTL).await.unwrap();
        store.put(&keys::post_key(7), "{}", TTL).await.unwrap();
        store.put(&keys::post_key(8), "{}", TTL).await.unwrap();
        (store, cache)
    }

    #[tokio::test]
    async fn test_targeted_evicts_fixed_keys_and_bumps_generation() {
        let (store, cache) = seeded_store().await;
        let invalidator = Invalidator::new(cache.clone(), InvalidationMode::Targeted);

        invalidator.handle(PostEvent::Updated { id: 7 }).await;

        assert_eq!(store.get(keys::AUTHORS_KEY).await.unwrap(), None);
        assert_eq!(store.get(keys::STATS_KEY).await.unwrap(), None);
        assert_eq!(store.get(&keys::post_key(7)).await.unwrap(), None);
        // Other posts stay; their entries were not touched by this write.
        assert!(store.get(&keys::post_key(8)).await.unwrap().is_some());
        assert_eq!(cache.generation().await, 1);
    }

    #[tokio::test]
    async fn test_flush_mode_clears_everything() {
        let (store, cache) = seeded_store().await;
        let invalidator = Invalidator::new(cache, InvalidationMode::Flush);

        invalidator.handle(PostEvent::Created { id: 99 }).await;

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_generation_bump_orphans_listing_keys() {
        let store = Arc::new(MemoryStore::new());
        let cache = PostCache::new(store.clone());
        let filter = crate::domain::entities::PostFilter::default();

        let old_key = keys::published_list_key(cache.generation().await, 1, &filter);
        store.put(&old_key, "{}", TTL).await.unwrap();

        Invalidator::new(cache.clone(), InvalidationMode::Targeted)
            .handle(PostEvent::Deleted { id: 1 })
            .await;

        let new_key = keys::published_list_key(cache.generation().await, 1, &filter);
        assert_ne!(old_key, new_key);
        assert_eq!(store.get(&new_key).await.unwrap(), None);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "targeted".parse::<InvalidationMode>().unwrap(),
            InvalidationMode::Targeted
        );
        assert_eq!(
            "flush".parse::<InvalidationMode>().unwrap(),
            InvalidationMode::Flush
        );
        assert!("everything".parse::<InvalidationMode>().is_err());
    }
}
