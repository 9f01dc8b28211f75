//! Repository trait for post data access.

use crate::domain::entities::{NewPost, Post, PostFilter, PostPatch, PostStatsSnapshot};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for blog posts and their authors.
///
/// All read queries that depend on the publish policy take `now` explicitly
/// so the "published" predicate is evaluated consistently and is testable
/// without a real clock.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPostRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Creates a new post and returns it with the author name joined.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the author does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError>;

    /// Finds a post by id, together with its author.
    ///
    /// Returns `Ok(None)` if absent; callers decide whether that is a 404.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Partially updates a post. `None` fields in the patch are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post matches `id`.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError>;

    /// Deletes a post. Returns `Ok(true)` if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists one page of published posts matching `filter`.
    ///
    /// `page` is 1-indexed. Sorting and filtering semantics are described on
    /// [`PostFilter`].
    async fn list_published(
        &self,
        filter: &PostFilter,
        page: i64,
        page_size: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError>;

    /// Counts published posts matching `filter`.
    async fn count_published(&self, filter: &PostFilter, now: DateTime<Utc>)
    -> Result<i64, AppError>;

    /// Lists all posts including drafts, newest created first.
    ///
    /// Backs the admin listing; never cached.
    async fn list_all(&self, page: i64, page_size: i64) -> Result<Vec<Post>, AppError>;

    /// Counts all posts including drafts.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Distinct display names of authors with at least one published post,
    /// case-sensitive dedup, sorted ascending.
    async fn author_names(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError>;

    /// Aggregate statistics over published posts, evaluated at `now`.
    ///
    /// The "this month" bucket uses the calendar month and year of `now`.
    async fn stats(&self, now: DateTime<Utc>) -> Result<PostStatsSnapshot, AppError>;

    /// The `limit` most recently published posts.
    ///
    /// Used as the "popular posts" approximation; there is no engagement
    /// table to rank by.
    async fn recent_published(&self, limit: i64, now: DateTime<Utc>)
    -> Result<Vec<Post>, AppError>;

    /// Checks that the data store is reachable.
    ///
    /// Used by the health endpoint and the CLI `db check` command.
    async fn ping(&self) -> Result<(), AppError>;
}
