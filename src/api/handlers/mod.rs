//! Request handlers for the JSON API.

pub mod admin_cache;
pub mod admin_posts;
pub mod authors;
pub mod engagement;
pub mod health;
pub mod posts;
pub mod stats;
