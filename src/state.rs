//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::cache::{CacheWarmer, InvalidationMode, Invalidator, PostCache};
use crate::application::services::{EngagementService, PostService, StatsService};
use crate::domain::repositories::PostRepository;
use crate::infrastructure::cache::CacheStore;

/// Application state shared across all request handlers.
///
/// The cache client is injected explicitly (never resolved from a global),
/// so tests can substitute an in-memory store, and every component that
/// touches the cache takes it through here.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub stats: Arc<StatsService>,
    pub engagement: Arc<EngagementService>,
    pub warmer: Arc<CacheWarmer>,
    pub invalidator: Invalidator,
    pub cache: PostCache,
    pub repository: Arc<dyn PostRepository>,
    pub base_url: String,
    pub admin_token: String,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn PostRepository>,
        store: Arc<dyn CacheStore>,
        invalidation: InvalidationMode,
        base_url: String,
        admin_token: String,
        public_page_size: i64,
        admin_page_size: i64,
    ) -> Self {
        let cache = PostCache::new(store);
        let invalidator = Invalidator::new(cache.clone(), invalidation);
        let posts = Arc::new(
            PostService::new(repository.clone(), cache.clone(), invalidator.clone())
                .with_page_sizes(public_page_size, admin_page_size),
        );
        let stats = Arc::new(StatsService::new(repository.clone(), cache.clone()));
        let warmer = Arc::new(CacheWarmer::new(
            posts.clone(),
            stats.clone(),
            cache.clone(),
        ));

        Self {
            posts,
            stats,
            engagement: Arc::new(EngagementService::new()),
            warmer,
            invalidator,
            cache,
            repository,
            base_url,
            admin_token,
        }
    }
}
