//! Liveness and component health endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{ComponentHealth, HealthResponse};
use crate::state::AppState;

/// `GET /health` — database and cache connectivity.
///
/// Always answers 200; a broken component flips `status` to "degraded"
/// rather than failing the probe, since the service keeps serving (the
/// cache fails open, and cached reads survive a database blip).
pub async fn check(State(st): State<AppState>) -> Json<HealthResponse> {
    let database_healthy = st.repository.ping().await.is_ok();
    let cache_healthy = st.cache.health_check().await;

    let status = if database_healthy && cache_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: ComponentHealth {
            healthy: database_healthy,
            driver: "postgres".to_string(),
        },
        cache: ComponentHealth {
            healthy: cache_healthy,
            driver: st.cache.driver().to_string(),
        },
    })
}
