//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Health check: DB and cache (public)
//! - `/api/*`             - Public catalog and engagement endpoints
//! - `/api/admin/*`       - Management API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Response cache** - Whole-body caching on anonymous catalog routes
//! - **Authentication** - Bearer token on the admin subtree
//! - **Path normalization** - Trailing slash handling

use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::health;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = router(state).layer(tracing::layer());
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// The route tree without the outer tracing/normalization layers.
///
/// Integration tests drive this directly.
pub fn router(state: AppState) -> Router {
    let admin_router = api::routes::admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::layer,
    ));

    let api_router = Router::new()
        .merge(api::routes::public_routes(state.clone()))
        .merge(api::routes::session_routes())
        .nest("/admin", admin_router);

    Router::new()
        .route("/health", get(health::check))
        .nest("/api", api_router)
        .with_state(state)
}
