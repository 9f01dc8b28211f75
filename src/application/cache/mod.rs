//! The post cache layer.
//!
//! Memoizes expensive read queries (published listings, the author roster,
//! aggregate statistics, single-post lookups) behind string keys in a
//! shared key-value store, and invalidates on every post mutation.
//!
//! - [`keys`] - deterministic key construction
//! - [`ttl`] - per-dataset TTL policy
//! - [`PostCache`] - typed read-through wrapper (get-or-compute-and-store)
//! - [`Invalidator`] - targeted eviction (default) or full flush (fallback)
//! - [`CacheWarmer`] - operator-triggered population of the hottest entries

pub mod keys;
pub mod ttl;

mod invalidator;
mod remember;
mod warmup;

pub use invalidator::{InvalidationMode, Invalidator, PostEvent};
pub use remember::PostCache;
pub use warmup::{CacheWarmer, WarmupReport};
