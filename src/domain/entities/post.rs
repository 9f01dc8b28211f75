//! Post entity and related value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A blog post with its author's display name.
///
/// Entities are serializable because pages of posts are stored as JSON
/// in the cache layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub title: String,
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Returns true if the post is visible to readers at `now`.
    ///
    /// This is the single source of truth for the publish policy: a post is
    /// published iff `published_at` is set and not in the future. A
    /// future-dated timestamp means "scheduled", not "published". The SQL
    /// counterpart lives in
    /// [`crate::infrastructure::persistence::PgPostRepository`] as the
    /// `published_at IS NOT NULL AND published_at <= $now` predicate.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.published_at.is_some_and(|p| p <= now)
    }
}

/// Input data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial update for an existing post.
///
/// `None` fields are left unchanged.
/// `published_at: Some(None)` unpublishes; `Some(Some(t))` (re)publishes at `t`.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<Option<DateTime<Utc>>>,
}

/// Sort modes for the published listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Publish time descending (default).
    #[default]
    Latest,
    /// Publish time ascending.
    Oldest,
    /// Title lexicographic ascending.
    Title,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    /// Unknown values fall back to an error; handlers map that to a 400.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "oldest" => Ok(Self::Oldest),
            "title" => Ok(Self::Title),
            other => Err(format!("unknown sort mode '{other}'")),
        }
    }
}

/// Filter criteria for published listing queries.
///
/// Empty strings mean "no filter". Both matches are case-insensitive
/// substring matches (`search` against title OR body, `author` against the
/// author display name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub search: String,
    pub author: String,
    pub sort: SortOrder,
}

impl PostFilter {
    pub fn new(search: impl Into<String>, author: impl Into<String>, sort: SortOrder) -> Self {
        Self {
            search: search.into().trim().to_string(),
            author: author.into().trim().to_string(),
            sort,
        }
    }
}

/// One page of published posts with pagination metadata.
///
/// This is the unit stored under a published-list cache key, so a cached
/// page is always internally consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedPage {
    pub items: Vec<Post>,
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PublishedPage {
    pub fn new(items: Vec<Post>, page: i64, page_size: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + page_size - 1) / page_size
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

/// Aggregate statistics over published posts.
///
/// Recomputed from post rows at produce time and cached; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostStatsSnapshot {
    pub total_posts: i64,
    pub total_authors: i64,
    pub latest_post_date: Option<DateTime<Utc>>,
    pub posts_this_month: i64,
}
