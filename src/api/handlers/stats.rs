//! Aggregate statistics endpoint.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/stats` — post counts and recency, cached for 15 minutes.
pub async fn show(State(st): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let snapshot = st.stats.snapshot().await?;
    Ok(Json(snapshot.into()))
}
