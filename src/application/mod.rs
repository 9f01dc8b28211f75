//! Application layer: services and the post cache layer.

pub mod cache;
pub mod services;
