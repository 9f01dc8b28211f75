//! Public post browsing endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::api::dto::pagination::ListQuery;
use crate::api::dto::posts::{PostListResponse, PostResponse};
use crate::application::services::post_service::DEFAULT_POPULAR_LIMIT;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/posts` — one page of the published listing.
///
/// Accepts `page`, `q` (search), `author`, and `sort` query parameters.
/// Unknown sort values and page 0 are rejected before any cache access.
pub async fn list(
    State(st): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PostListResponse>, AppError> {
    let (page, filter) = query
        .validate()
        .map_err(|message| AppError::bad_request(message, json!({})))?;

    let page = st.posts.list_published(&filter, page).await?;
    Ok(Json(page.into()))
}

/// `GET /api/posts/{id}` — a single published post.
///
/// Drafts and scheduled posts answer 404 here regardless of what the cache
/// holds for the id.
pub async fn show(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let post = st.posts.get_published(id).await?;
    Ok(Json(post.into()))
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

/// `GET /api/posts/popular` — the most recently published posts.
pub async fn popular(
    State(st): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let limit = query.limit.map_or(DEFAULT_POPULAR_LIMIT, i64::from);
    let posts = st.posts.popular(limit).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}
