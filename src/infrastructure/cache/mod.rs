//! Cache store backends.
//!
//! Provides a [`CacheStore`] trait with two implementations:
//! - [`RedisStore`] - production Redis-backed store
//! - [`MemoryStore`] - in-process store, used when Redis is not configured
//!   and as the fake in tests
//!
//! The read-through logic, key construction, and invalidation policy live in
//! [`crate::application::cache`]; this module only knows about opaque string
//! keys and values.

mod memory_store;
mod redis_store;
mod store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use store::{CacheError, CacheResult, CacheStore};
