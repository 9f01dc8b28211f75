//! Bearer token authentication for the admin API.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticates admin requests using a Bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The token is compared against the configured `ADMIN_TOKEN` by SHA-256
/// digest so the comparison does not leak length or prefix timing.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, malformed, or the
/// token does not match.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if digest(token) == digest(&st.admin_token) => Ok(next.run(req).await),
        _ => Err(AppError::unauthorized(
            "Invalid or missing admin token",
            json!({}),
        )),
    }
}

fn digest(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}
