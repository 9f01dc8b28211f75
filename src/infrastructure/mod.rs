//! Infrastructure layer: database and cache backends.

pub mod cache;
pub mod persistence;
