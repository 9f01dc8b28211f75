//! Cache warm-up orchestration.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::application::services::post_service::DEFAULT_POPULAR_LIMIT;
use crate::application::services::{PostService, StatsService};
use crate::domain::entities::PostFilter;
use crate::error::AppError;

use super::PostCache;

/// Summary of one warm-up run.
#[derive(Debug, Clone, Serialize)]
pub struct WarmupReport {
    pub warmed: Vec<&'static str>,
    pub elapsed_ms: u64,
    pub warmed_at: DateTime<Utc>,
}

/// Proactively populates the hottest cache entries so the first real
/// request after a flush is not a cold miss.
///
/// Operator-triggered (CLI or admin endpoint), never scheduled. Records the
/// warm-up timestamp for diagnostics.
pub struct CacheWarmer {
    posts: Arc<PostService>,
    stats: Arc<StatsService>,
    cache: PostCache,
}

impl CacheWarmer {
    pub fn new(posts: Arc<PostService>, stats: Arc<StatsService>, cache: PostCache) -> Self {
        Self {
            posts,
            stats,
            cache,
        }
    }

    /// Warms the author roster, the first page of the default listing, the
    /// statistics snapshot, and the popular posts.
    ///
    /// # Errors
    ///
    /// Fails on the first producer error; entries warmed before the failure
    /// stay cached.
    pub async fn warm_up(&self) -> Result<WarmupReport, AppError> {
        let started = Instant::now();
        let mut warmed = Vec::with_capacity(4);

        self.posts.author_roster().await?;
        warmed.push("authors roster");

        self.posts
            .list_published(&PostFilter::default(), 1)
            .await?;
        warmed.push("published posts (first page)");

        self.stats.snapshot().await?;
        warmed.push("post statistics");

        self.posts.popular(DEFAULT_POPULAR_LIMIT).await?;
        warmed.push("popular posts");

        let warmed_at = Utc::now();
        self.cache.record_warmup(warmed_at).await;

        let report = WarmupReport {
            warmed,
            elapsed_ms: started.elapsed().as_millis() as u64,
            warmed_at,
        };
        info!(elapsed_ms = report.elapsed_ms, "cache warm-up completed");
        Ok(report)
    }
}
