//! Session-scoped engagement endpoints: like, bookmark, flags, share.
//!
//! All four resolve the post through the cached published lookup first, so
//! a draft or missing post answers 404 before any session state is touched.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::api::dto::engagement::{EngagementResponse, ShareResponse, ToggleResponse};
use crate::api::middleware::session::VisitorSession;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/posts/{id}/like` — flips the like flag for this session.
pub async fn toggle_like(
    State(st): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    st.posts.get_published(id).await?;
    let session = VisitorSession::from_headers(&headers);
    let active = st.engagement.toggle_like(&session.id, id);

    let body = ToggleResponse {
        post_id: id,
        action: if active { "like" } else { "unlike" }.to_string(),
        active,
    };
    Ok(with_session_cookie(&session, body))
}

/// `POST /api/posts/{id}/bookmark` — flips the bookmark flag for this
/// session.
pub async fn toggle_bookmark(
    State(st): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    st.posts.get_published(id).await?;
    let session = VisitorSession::from_headers(&headers);
    let active = st.engagement.toggle_bookmark(&session.id, id);

    let body = ToggleResponse {
        post_id: id,
        action: if active { "bookmark" } else { "unbookmark" }.to_string(),
        active,
    };
    Ok(with_session_cookie(&session, body))
}

/// `GET /api/posts/{id}/engagement` — current flags for this session.
///
/// Per-session output, so this route must stay outside the response cache.
pub async fn flags(
    State(st): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    st.posts.get_published(id).await?;
    let session = VisitorSession::from_headers(&headers);
    let flags = st.engagement.flags(&session.id, id);

    let body = EngagementResponse {
        post_id: id,
        liked: flags.liked,
        bookmarked: flags.bookmarked,
    };
    Ok(with_session_cookie(&session, body))
}

/// `GET /api/posts/{id}/share` — the canonical public URL for a post.
pub async fn share(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShareResponse>, AppError> {
    st.posts.get_published(id).await?;
    let url = format!("{}/posts/{}", st.base_url.trim_end_matches('/'), id);
    Ok(Json(ShareResponse { post_id: id, url }))
}

fn with_session_cookie<T: Serialize>(session: &VisitorSession, body: T) -> Response {
    let mut response = Json(body).into_response();
    if let Some((name, value)) = session.set_cookie() {
        response.headers_mut().append(name, value);
    }
    response
}
