//! Post read/write service with read-through caching.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::application::cache::{Invalidator, PostCache, PostEvent, keys, ttl};
use crate::domain::entities::{NewPost, Post, PostFilter, PostPatch, PublishedPage};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Default number of posts per page on the public listing.
pub const PUBLIC_PAGE_SIZE: i64 = 12;

/// Default number of posts per page on the admin listing.
pub const ADMIN_PAGE_SIZE: i64 = 10;

/// How many posts the "popular" widget shows by default.
pub const DEFAULT_POPULAR_LIMIT: i64 = 5;

/// Service for browsing and managing posts.
///
/// Read paths for visitors go through the cache layer; admin reads and all
/// writes hit the repository directly. Every successful mutation emits a
/// [`PostEvent`] to the invalidator after the commit.
pub struct PostService {
    repository: Arc<dyn PostRepository>,
    cache: PostCache,
    invalidator: Invalidator,
    public_page_size: i64,
    admin_page_size: i64,
}

impl PostService {
    pub fn new(
        repository: Arc<dyn PostRepository>,
        cache: PostCache,
        invalidator: Invalidator,
    ) -> Self {
        Self {
            repository,
            cache,
            invalidator,
            public_page_size: PUBLIC_PAGE_SIZE,
            admin_page_size: ADMIN_PAGE_SIZE,
        }
    }

    /// Overrides the listing page sizes (from configuration).
    pub fn with_page_sizes(mut self, public: i64, admin: i64) -> Self {
        self.public_page_size = public;
        self.admin_page_size = admin;
        self
    }

    pub fn public_page_size(&self) -> i64 {
        self.public_page_size
    }

    /// One page of the published listing, cached for 30 minutes.
    ///
    /// The page and its total counts are produced together and stored as a
    /// single entry, so a cached page never mixes state from two snapshots.
    pub async fn list_published(
        &self,
        filter: &PostFilter,
        page: i64,
    ) -> Result<PublishedPage, AppError> {
        let page = page.max(1);
        let generation = self.cache.generation().await;
        let key = keys::published_list_key(generation, page, filter);
        let page_size = self.public_page_size;

        self.cache
            .remember(&key, ttl::POSTS_LIST, || async {
                let now = Utc::now();
                let (items, total) = tokio::try_join!(
                    self.repository.list_published(filter, page, page_size, now),
                    self.repository.count_published(filter, now)
                )?;
                Ok(PublishedPage::new(items, page, page_size, total))
            })
            .await
    }

    /// A single published post by id, cached for 60 minutes.
    ///
    /// The cached value is the raw lookup result (including "absent"), and
    /// the publish policy is applied after retrieval so an entry cached
    /// while a post was scheduled does not leak it early.
    pub async fn get_published(&self, id: i64) -> Result<Post, AppError> {
        let post = self
            .cache
            .remember(&keys::post_key(id), ttl::POST_DETAIL, || async {
                self.repository.find_by_id(id).await
            })
            .await?;

        match post {
            Some(post) if post.is_published(Utc::now()) => Ok(post),
            _ => Err(AppError::not_found("Post not found", json!({ "id": id }))),
        }
    }

    /// Distinct author roster, cached for 2 hours.
    pub async fn author_roster(&self) -> Result<Vec<String>, AppError> {
        self.cache
            .remember(keys::AUTHORS_KEY, ttl::AUTHORS_LIST, || async {
                self.repository.author_names(Utc::now()).await
            })
            .await
    }

    /// Most recently published posts, cached for 2 hours.
    ///
    /// "Popular" is an approximation: without an engagement table the most
    /// recent posts stand in. Session like/bookmark flags deliberately do
    /// not feed this ranking.
    pub async fn popular(&self, limit: i64) -> Result<Vec<Post>, AppError> {
        let limit = limit.clamp(1, 50);
        let generation = self.cache.generation().await;
        let key = keys::popular_key(generation, limit);

        self.cache
            .remember(&key, ttl::POPULAR, || async {
                self.repository.recent_published(limit, Utc::now()).await
            })
            .await
    }

    /// One page of all posts including drafts, newest created first.
    ///
    /// Admin view; never cached so an author always sees their own edits
    /// immediately.
    pub async fn list_all(&self, page: i64) -> Result<PublishedPage, AppError> {
        let page = page.max(1);
        let page_size = self.admin_page_size;
        let (items, total) = tokio::try_join!(
            self.repository.list_all(page, page_size),
            self.repository.count_all()
        )?;
        Ok(PublishedPage::new(items, page, page_size, total))
    }

    /// A single post by id regardless of publish state (admin view).
    pub async fn get_any(&self, id: i64) -> Result<Post, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
    }

    /// Creates a post and invalidates post caches.
    ///
    /// Input validation happens in the DTO layer before this point, so a
    /// rejected write never reaches the cache.
    pub async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let post = self.repository.create(new_post).await?;
        self.invalidator
            .handle(PostEvent::Created { id: post.id })
            .await;
        Ok(post)
    }

    /// Applies a partial update and invalidates post caches.
    pub async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError> {
        let post = self.repository.update(id, patch).await?;
        self.invalidator.handle(PostEvent::Updated { id }).await;
        Ok(post)
    }

    /// Deletes a post and invalidates post caches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post matches `id`; nothing is
    /// invalidated in that case.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Post not found", json!({ "id": id })));
        }
        self.invalidator.handle(PostEvent::Deleted { id }).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cache::InvalidationMode;
    use crate::domain::entities::SortOrder;
    use crate::domain::repositories::MockPostRepository;
    use crate::infrastructure::cache::{CacheStore, MemoryStore};
    use chrono::{DateTime, Duration, Utc};

    fn sample_post(id: i64, title: &str, published_at: Option<DateTime<Utc>>) -> Post {
        let now = Utc::now();
        Post {
            id,
            author_id: 1,
            author_name: "Ada".to_string(),
            title: title.to_string(),
            body: "Body text long enough to be a real post.".to_string(),
            published_at,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(repo: MockPostRepository) -> (PostService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache = PostCache::new(store.clone());
        let invalidator = Invalidator::new(cache.clone(), InvalidationMode::Targeted);
        (
            PostService::new(Arc::new(repo), cache, invalidator),
            store,
        )
    }

    #[tokio::test]
    async fn test_list_published_is_cached_across_calls() {
        let mut repo = MockPostRepository::new();
        let published = Some(Utc::now() - Duration::hours(1));

        repo.expect_list_published()
            .times(1)
            .returning(move |_, _, _, _| Ok(vec![sample_post(1, "Alpha", published)]));
        repo.expect_count_published().times(1).returning(|_, _| Ok(1));

        let (service, _) = service(repo);
        let filter = PostFilter::default();

        let first = service.list_published(&filter, 1).await.unwrap();
        let second = service.list_published(&filter, 1).await.unwrap();

        assert_eq!(first.items.len(), 1);
        assert_eq!(second.items[0].title, "Alpha");
        assert_eq!(second.total_items, 1);
    }

    #[tokio::test]
    async fn test_distinct_filters_produce_distinct_entries() {
        let mut repo = MockPostRepository::new();
        repo.expect_list_published()
            .times(2)
            .returning(|_, _, _, _| Ok(vec![]));
        repo.expect_count_published().times(2).returning(|_, _| Ok(0));

        let (service, _) = service(repo);

        service
            .list_published(&PostFilter::default(), 1)
            .await
            .unwrap();
        service
            .list_published(&PostFilter::new("rust", "", SortOrder::Latest), 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_published_hides_drafts_and_scheduled() {
        let mut repo = MockPostRepository::new();
        let future = Some(Utc::now() + Duration::hours(1));
        repo.expect_find_by_id()
            .returning(move |id| match id {
                1 => Ok(Some(sample_post(1, "Draft", None))),
                2 => Ok(Some(sample_post(2, "Scheduled", future))),
                _ => Ok(None),
            });

        let (service, _) = service(repo);

        assert!(matches!(
            service.get_published(1).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.get_published(2).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.get_published(3).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_published_returns_live_post_once_from_repo() {
        let mut repo = MockPostRepository::new();
        let published = Some(Utc::now() - Duration::minutes(10));
        repo.expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(sample_post(9, "Live", published))));

        let (service, _) = service(repo);

        let first = service.get_published(9).await.unwrap();
        let second = service.get_published(9).await.unwrap();
        assert_eq!(first.id, 9);
        assert_eq!(second.title, "Live");
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_roster() {
        let mut repo = MockPostRepository::new();
        repo.expect_author_names()
            .times(2)
            .returning(|_| Ok(vec!["Ada".to_string()]));
        let published = Some(Utc::now());
        repo.expect_create()
            .times(1)
            .returning(move |_| Ok(sample_post(5, "New", published)));

        let (service, store) = service(repo);

        service.author_roster().await.unwrap();
        assert!(store.get(keys::AUTHORS_KEY).await.unwrap().is_some());

        service
            .create(NewPost {
                author_id: 1,
                title: "New".to_string(),
                body: "Long enough body for validation.".to_string(),
                published_at: Some(Utc::now()),
            })
            .await
            .unwrap();

        assert_eq!(store.get(keys::AUTHORS_KEY).await.unwrap(), None);
        // Next roster read recomputes (second expected repo call).
        service.author_roster().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_post_does_not_invalidate() {
        let mut repo = MockPostRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let (service, store) = service(repo);
        let cache = PostCache::new(store.clone());

        let result = service.delete(404).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(cache.generation().await, 0);
    }

    #[tokio::test]
    async fn test_popular_clamps_limit() {
        let mut repo = MockPostRepository::new();
        repo.expect_recent_published()
            .withf(|limit, _| *limit == 50)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let (service, _) = service(repo);
        service.popular(10_000).await.unwrap();
    }
}
