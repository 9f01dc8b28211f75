//! In-process cache store.

use super::store::{CacheResult, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// An in-memory cache store with per-entry expiry.
///
/// Used as the fallback when Redis is not configured and as the fake in
/// tests. Entries are dropped lazily when read after their deadline; a
/// long-lived process with write-heavy churn relies on the invalidator's
/// flush/forget calls rather than a background sweeper.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    expires_at: Instant,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory cache store");
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live (unexpired) entries, for diagnostics and tests.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .expect("cache lock poisoned")
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        {
            let entries = self.entries.read().expect("cache lock poisoned");
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {} // expired, remove below
                None => return Ok(None),
            }
        }

        self.entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.to_string(), entry);
        Ok(())
    }

    async fn forget(&self, key: &str) -> CacheResult<()> {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
        Ok(())
    }

    async fn flush(&self) -> CacheResult<()> {
        self.entries.write().expect("cache lock poisoned").clear();
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn driver(&self) -> &'static str {
        "memory"
    }
}
