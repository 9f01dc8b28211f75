//! Author roster endpoint.

use axum::{Json, extract::State};

use crate::api::dto::stats::AuthorsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/authors` — distinct names of authors with published posts.
pub async fn list(State(st): State<AppState>) -> Result<Json<AuthorsResponse>, AppError> {
    let authors = st.posts.author_roster().await?;
    Ok(Json(AuthorsResponse { authors }))
}
