//! API route tables.

use axum::routing::{get, patch, post};
use axum::{Router, middleware};

use crate::api::handlers::{admin_cache, admin_posts, authors, engagement, posts, stats};
use crate::api::middleware::response_cache;
use crate::state::AppState;

/// Anonymous catalog routes whose output is the same for every visitor.
///
/// These sit behind the response-fragment cache; session-scoped engagement
/// routes live in [`session_routes`] instead.
pub fn public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list))
        .route("/posts/popular", get(posts::popular))
        .route("/posts/{id}", get(posts::show))
        .route("/authors", get(authors::list))
        .route("/stats", get(stats::show))
        .route_layer(middleware::from_fn_with_state(
            state,
            response_cache::layer,
        ))
}

/// Per-visitor routes. Never response-cached.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/posts/{id}/like", post(engagement::toggle_like))
        .route("/posts/{id}/bookmark", post(engagement::toggle_bookmark))
        .route("/posts/{id}/engagement", get(engagement::flags))
        .route("/posts/{id}/share", get(engagement::share))
}

/// Admin routes; the caller wraps these in the Bearer auth layer.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(admin_posts::list).post(admin_posts::create))
        .route(
            "/posts/{id}",
            patch(admin_posts::update)
                .get(admin_posts::show)
                .delete(admin_posts::delete),
        )
        .route("/cache/warmup", post(admin_cache::warmup))
        .route("/cache/clear", post(admin_cache::clear))
        .route("/cache/stats", get(admin_cache::stats))
}
