//! Post request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{NewPost, Post, PostPatch, PublishedPage};

/// A post as returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author_name,
            title: post.title,
            body: post.body,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Pagination metadata echoed with every listing response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

/// A page of posts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<PostResponse>,
}

impl From<PublishedPage> for PostListResponse {
    fn from(page: PublishedPage) -> Self {
        Self {
            pagination: PaginationMeta {
                page: page.page,
                page_size: page.page_size,
                total_items: page.total_items,
                total_pages: page.total_pages,
            },
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request body for creating a post.
///
/// Rejected input never reaches the service layer, so no cache entry is
/// written or invalidated for a failed create.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub author_id: i64,

    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "body must be at least 10 characters"))]
    pub body: String,

    /// Omit (or null) to create a draft; a future timestamp schedules.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost {
            author_id: req.author_id,
            title: req.title,
            body: req.body,
            published_at: req.published_at,
        }
    }
}

/// Request body for partially updating a post.
///
/// Absent fields are unchanged. `unpublish: true` clears the publish
/// timestamp and wins over `published_at`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, message = "body must be at least 10 characters"))]
    pub body: Option<String>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub unpublish: bool,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        let published_at = if req.unpublish {
            Some(None)
        } else {
            req.published_at.map(Some)
        };
        PostPatch {
            title: req.title,
            body: req.body,
            published_at,
        }
    }
}
