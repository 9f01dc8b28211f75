//! Domain layer: entities and repository traits.
//!
//! This layer has no dependencies on the web framework, the database driver,
//! or the cache backend. Concrete implementations live in
//! [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
