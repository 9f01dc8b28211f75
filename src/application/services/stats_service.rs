//! Aggregate post statistics service.

use std::sync::Arc;

use chrono::Utc;

use crate::application::cache::{PostCache, keys, ttl};
use crate::domain::entities::PostStatsSnapshot;
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Service producing the cached statistics snapshot shown on dashboards.
pub struct StatsService {
    repository: Arc<dyn PostRepository>,
    cache: PostCache,
}

impl StatsService {
    pub fn new(repository: Arc<dyn PostRepository>, cache: PostCache) -> Self {
        Self { repository, cache }
    }

    /// The statistics snapshot, cached for 15 minutes.
    ///
    /// The "this month" bucket is evaluated at compute time, so a snapshot
    /// produced just before a month rollover stays slightly stale until TTL
    /// expiry or the next invalidation. Accepted; the short TTL bounds it.
    pub async fn snapshot(&self) -> Result<PostStatsSnapshot, AppError> {
        self.cache
            .remember(keys::STATS_KEY, ttl::STATS, || async {
                self.repository.stats(Utc::now()).await
            })
            .await
    }

    /// Recomputes the snapshot bypassing the cache.
    ///
    /// Used by the CLI `stats` command so the operator always sees current
    /// numbers next to the cache diagnostics.
    pub async fn snapshot_uncached(&self) -> Result<PostStatsSnapshot, AppError> {
        self.repository.stats(Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockPostRepository;
    use crate::infrastructure::cache::MemoryStore;

    #[tokio::test]
    async fn test_snapshot_is_cached() {
        let mut repo = MockPostRepository::new();
        repo.expect_stats().times(1).returning(|now| {
            Ok(PostStatsSnapshot {
                total_posts: 3,
                total_authors: 2,
                latest_post_date: Some(now),
                posts_this_month: 3,
            })
        });

        let cache = PostCache::new(Arc::new(MemoryStore::new()));
        let service = StatsService::new(Arc::new(repo), cache);

        let first = service.snapshot().await.unwrap();
        let second = service.snapshot().await.unwrap();

        assert_eq!(first.total_posts, 3);
        assert_eq!(second.total_authors, 2);
        assert_eq!(second.posts_this_month, 3);
    }
}
