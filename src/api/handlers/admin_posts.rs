//! Admin post management: full CRUD including drafts.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::{Validate, ValidationErrors};

use crate::api::dto::pagination::PageQuery;
use crate::api::dto::posts::{CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/admin/posts` — all posts including drafts, newest first.
pub async fn list(
    State(st): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostListResponse>, AppError> {
    let page = query
        .validate()
        .map_err(|message| AppError::bad_request(message, json!({})))?;
    let page = st.posts.list_all(page).await?;
    Ok(Json(page.into()))
}

/// `GET /api/admin/posts/{id}` — a post regardless of publish state.
pub async fn show(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let post = st.posts.get_any(id).await?;
    Ok(Json(post.into()))
}

/// `POST /api/admin/posts` — creates a post (draft unless `published_at`
/// is set). Returns 201 with the stored post.
pub async fn create(
    State(st): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    request.validate().map_err(validation_error)?;
    let post = st.posts.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// `PATCH /api/admin/posts/{id}` — partial update; absent fields are
/// unchanged.
pub async fn update(
    State(st): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    request.validate().map_err(validation_error)?;
    let post = st.posts.update(id, request.into()).await?;
    Ok(Json(post.into()))
}

/// `DELETE /api/admin/posts/{id}` — removes a post; 404 if absent.
pub async fn delete(State(st): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    st.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validation_error(errors: ValidationErrors) -> AppError {
    let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
    AppError::bad_request("Validation failed", details)
}
