//! Visitor session cookie handling.
//!
//! Engagement flags are scoped to an anonymous visitor session identified
//! by a random cookie. There is no account attached: the cookie only
//! namespaces the in-process like/bookmark flags, which vanish when the
//! session expires.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE, header::SET_COOKIE};
use rand::Rng;
use rand::distr::Alphanumeric;

/// Cookie carrying the visitor session id.
pub const SESSION_COOKIE: &str = "qp_session";

const SESSION_ID_LEN: usize = 32;
const COOKIE_MAX_AGE_SECS: u64 = 2 * 60 * 60;

/// A visitor session id, possibly freshly minted for this request.
pub struct VisitorSession {
    pub id: String,
    pub is_new: bool,
}

impl VisitorSession {
    /// Reads the session cookie, minting a new id when absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match extract_cookie(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: generate_id(),
                is_new: true,
            },
        }
    }

    /// `Set-Cookie` value for a freshly minted session, `None` otherwise.
    pub fn set_cookie(&self) -> Option<(axum::http::HeaderName, HeaderValue)> {
        if !self.is_new {
            return None;
        }
        let value = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.id, COOKIE_MAX_AGE_SECS
        );
        HeaderValue::from_str(&value).ok().map(|v| (SET_COOKIE, v))
    }
}

fn extract_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|header| header.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => {
                        Some(value.to_string())
                    }
                    _ => None,
                }
            })
        })
}

fn generate_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}
