//! Whole-response caching for public read endpoints.
//!
//! Sits in front of the anonymous catalog routes and stores successful JSON
//! bodies as view fragments, keyed by generation plus the full request path
//! and query. A generation bump after any post mutation orphans every cached
//! response at once, so this layer never serves data the invalidator has
//! already retired.
//!
//! Only attached to routes whose output is identical for every visitor;
//! session-scoped endpoints must never pass through here.

use axum::{
    body::{Body, HttpBody, to_bytes},
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::application::cache::{keys, ttl};
use crate::state::AppState;

/// Reported via `X-Cache-Status` so operators can see hit rates with curl.
const CACHE_STATUS_HEADER: &str = "x-cache-status";

/// Bodies above this size are served but not stored.
const MAX_CACHED_BODY_BYTES: usize = 1024 * 1024;

pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET || req.headers().contains_key(header::AUTHORIZATION) {
        return next.run(req).await;
    }

    let request_line = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let generation = st.cache.generation().await;
    let key = keys::view_key(generation, "http", &request_line);

    if let Ok(Some(body)) = st.cache.store().get(&key).await {
        return cached_response(body);
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    // Bodies over the cap (or of unknown size) are served untouched and
    // just not stored: once `to_bytes` has consumed a too-large body there
    // is nothing left to send, so the size must be checked first.
    let oversized = response
        .body()
        .size_hint()
        .upper()
        .is_none_or(|size| size > MAX_CACHED_BODY_BYTES as u64);
    if oversized {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to read response body for {request_line}: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if let Ok(body) = std::str::from_utf8(&bytes) {
        if let Err(e) = st.cache.store().put(&key, body, ttl::VIEW_FRAGMENT).await {
            warn!("failed to cache response for {request_line}: {e}");
        }
    }

    parts
        .headers
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

fn cached_response(body: String) -> Response {
    let mut response = Response::new(Body::from(body));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("HIT"));
    response
}
