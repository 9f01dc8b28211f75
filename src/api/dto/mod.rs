//! Request and response DTOs for the JSON API.

pub mod cache;
pub mod engagement;
pub mod health;
pub mod pagination;
pub mod posts;
pub mod stats;
