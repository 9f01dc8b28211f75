//! HTTP middleware: admin auth, visitor sessions, response caching, tracing.

pub mod auth;
pub mod response_cache;
pub mod session;
pub mod tracing;
