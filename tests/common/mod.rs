//! Shared test fixtures: an in-memory repository and server builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Datelike, Duration, Utc};
use serde_json::json;

use quillpress::application::cache::InvalidationMode;
use quillpress::domain::entities::{
    NewPost, Post, PostFilter, PostPatch, PostStatsSnapshot, SortOrder,
};
use quillpress::domain::repositories::PostRepository;
use quillpress::error::AppError;
use quillpress::infrastructure::cache::MemoryStore;
use quillpress::routes;
use quillpress::state::AppState;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const BASE_URL: &str = "http://blog.test";

/// Producer-side call counters, used to assert read-through behavior.
#[derive(Default)]
pub struct RepositoryCalls {
    pub list_published: AtomicUsize,
    pub count_published: AtomicUsize,
    pub find_by_id: AtomicUsize,
    pub author_names: AtomicUsize,
    pub stats: AtomicUsize,
    pub recent_published: AtomicUsize,
}

/// In-memory [`PostRepository`] with the same query semantics as the
/// PostgreSQL implementation: case-insensitive substring filters, the
/// `published_at IS NOT NULL AND <= now` predicate, and 1-indexed pages.
pub struct InMemoryPostRepository {
    authors: HashMap<i64, String>,
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
    pub calls: RepositoryCalls,
}

impl InMemoryPostRepository {
    pub fn new(authors: &[(i64, &str)]) -> Self {
        Self {
            authors: authors
                .iter()
                .map(|(id, name)| (*id, name.to_string()))
                .collect(),
            posts: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            calls: RepositoryCalls::default(),
        }
    }

    /// Inserts a post directly, bypassing the trait (for seeding).
    pub fn seed(&self, author_id: i64, title: &str, body: &str, published_at: Option<DateTime<Utc>>) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let author_name = self
            .authors
            .get(&author_id)
            .cloned()
            .unwrap_or_else(|| format!("author-{author_id}"));
        self.posts.lock().unwrap().push(Post {
            id,
            author_id,
            author_name,
            title: title.to_string(),
            body: body.to_string(),
            published_at,
            created_at: now,
            updated_at: now,
        });
        id
    }

    fn matches(post: &Post, filter: &PostFilter) -> bool {
        let search_ok = filter.search.is_empty() || {
            let needle = filter.search.to_lowercase();
            post.title.to_lowercase().contains(&needle)
                || post.body.to_lowercase().contains(&needle)
        };
        let author_ok = filter.author.is_empty()
            || post
                .author_name
                .to_lowercase()
                .contains(&filter.author.to_lowercase());
        search_ok && author_ok
    }

    fn published_matching(&self, filter: &PostFilter, now: DateTime<Utc>) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_published(now) && Self::matches(p, filter))
            .cloned()
            .collect();

        match filter.sort {
            SortOrder::Latest => posts.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
            SortOrder::Oldest => posts.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
            SortOrder::Title => posts.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        posts
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let author_name = self.authors.get(&new_post.author_id).cloned().ok_or_else(|| {
            AppError::bad_request("Author does not exist", json!({ "author_id": new_post.author_id }))
        })?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let post = Post {
            id,
            author_id: new_post.author_id,
            author_name,
            title: new_post.title,
            body: new_post.body,
            published_at: new_post.published_at,
            created_at: now,
            updated_at: now,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        self.calls.find_by_id.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(body) = patch.body {
            post.body = body;
        }
        if let Some(published_at) = patch.published_at {
            post.published_at = published_at;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        page: i64,
        page_size: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError> {
        self.calls.list_published.fetch_add(1, Ordering::SeqCst);
        let posts = self.published_matching(filter, now);
        let offset = ((page - 1) * page_size) as usize;
        Ok(posts
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect())
    }

    async fn count_published(
        &self,
        filter: &PostFilter,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        self.calls.count_published.fetch_add(1, Ordering::SeqCst);
        Ok(self.published_matching(filter, now).len() as i64)
    }

    async fn list_all(&self, page: i64, page_size: i64) -> Result<Vec<Post>, AppError> {
        let mut posts: Vec<Post> = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let offset = ((page - 1) * page_size) as usize;
        Ok(posts
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.posts.lock().unwrap().len() as i64)
    }

    async fn author_names(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        self.calls.author_names.fetch_add(1, Ordering::SeqCst);
        let mut names: Vec<String> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_published(now))
            .map(|p| p.author_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<PostStatsSnapshot, AppError> {
        self.calls.stats.fetch_add(1, Ordering::SeqCst);
        let posts = self.posts.lock().unwrap();
        let published: Vec<&Post> = posts.iter().filter(|p| p.is_published(now)).collect();

        let mut authors: Vec<&str> = published.iter().map(|p| p.author_name.as_str()).collect();
        authors.sort();
        authors.dedup();

        let latest_post_date = published.iter().filter_map(|p| p.published_at).max();
        let posts_this_month = published
            .iter()
            .filter_map(|p| p.published_at)
            .filter(|d| d.year() == now.year() && d.month() == now.month())
            .count() as i64;

        Ok(PostStatsSnapshot {
            total_posts: published.len() as i64,
            total_authors: authors.len() as i64,
            latest_post_date,
            posts_this_month,
        })
    }

    async fn recent_published(
        &self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError> {
        self.calls.recent_published.fetch_add(1, Ordering::SeqCst);
        let mut posts = self.published_matching(&PostFilter::default(), now);
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Application state over the in-memory repository and cache store.
pub fn test_state(repository: Arc<InMemoryPostRepository>) -> AppState {
    AppState::new(
        repository,
        Arc::new(MemoryStore::new()),
        InvalidationMode::Targeted,
        BASE_URL.to_string(),
        ADMIN_TOKEN.to_string(),
        12,
        10,
    )
}

/// Test server over the full route tree.
pub fn test_server(repository: Arc<InMemoryPostRepository>) -> TestServer {
    TestServer::new(routes::router(test_state(repository))).unwrap()
}

/// Test server that persists cookies across requests, for session tests.
pub fn test_server_with_cookies(repository: Arc<InMemoryPostRepository>) -> TestServer {
    TestServer::builder()
        .save_cookies()
        .build(routes::router(test_state(repository)))
        .unwrap()
}

/// A timestamp `days` days in the past.
pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// A timestamp `days` days in the future.
pub fn days_ahead(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

/// Bearer header value for the admin API.
pub fn bearer() -> String {
    format!("Bearer {ADMIN_TOKEN}")
}
