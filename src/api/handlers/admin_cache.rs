//! Admin cache operations: warm-up, clear, diagnostics.

use axum::{Json, extract::State};

use crate::api::dto::cache::{CacheStatsResponse, ClearResponse, WarmupResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/admin/cache/warmup` — populates the hottest entries.
pub async fn warmup(State(st): State<AppState>) -> Result<Json<WarmupResponse>, AppError> {
    let report = st.warmer.warm_up().await?;
    Ok(Json(WarmupResponse {
        warmed: report.warmed.iter().map(|s| s.to_string()).collect(),
        elapsed_ms: report.elapsed_ms,
        warmed_at: report.warmed_at.to_rfc3339(),
    }))
}

/// `POST /api/admin/cache/clear` — unconditional full flush.
///
/// Also drops the generation counter and warm-up marker; both read back as
/// their safe zero state afterwards.
pub async fn clear(State(st): State<AppState>) -> Json<ClearResponse> {
    st.invalidator.flush_all().await;
    Json(ClearResponse { flushed: true })
}

/// `GET /api/admin/cache/stats` — cache configuration plus the current
/// producer output.
///
/// The stats and author fields go through the normal read-through path, so
/// hitting this endpoint on a cold cache also warms those two entries.
pub async fn stats(State(st): State<AppState>) -> Result<Json<CacheStatsResponse>, AppError> {
    let snapshot = st.stats.snapshot().await?;
    let authors = st.posts.author_roster().await?;
    let last_warmup = st.cache.last_warmup().await.map(|dt| dt.to_rfc3339());

    Ok(Json(CacheStatsResponse {
        driver: st.cache.driver().to_string(),
        enabled: st.cache.health_check().await,
        invalidation: st.invalidator.mode().as_str().to_string(),
        last_warmup,
        stats: snapshot.into(),
        cached_authors: authors.len(),
    }))
}
