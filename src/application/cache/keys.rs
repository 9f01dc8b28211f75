//! Cache key construction.
//!
//! All key builders are pure: the same inputs always produce the same key,
//! with no clock or randomness involved. Parameterized key families
//! (published listings, popular posts, view fragments) embed a generation
//! counter so the invalidator can orphan a whole family by bumping one
//! number instead of enumerating keys (the store has no pattern deletion).

use crate::domain::entities::PostFilter;
use sha2::{Digest, Sha256};

/// Fixed key for the distinct author roster.
pub const AUTHORS_KEY: &str = "posts.authors";

/// Fixed key for the aggregate statistics snapshot.
pub const STATS_KEY: &str = "posts.stats";

/// Fixed key holding the listing-key generation counter.
pub const GENERATION_KEY: &str = "posts.generation";

/// Fixed key recording the last warm-up timestamp.
pub const LAST_WARMUP_KEY: &str = "cache.last_warmup";

/// Key for one page of the published listing.
///
/// Empty filters serialize as empty segments, so the default query
/// (no filters, page 1, latest sort) always collapses to the same key.
pub fn published_list_key(generation: u64, page: i64, filter: &PostFilter) -> String {
    format!(
        "posts.published.{}.{}.{}.{}.{}",
        generation, page, filter.search, filter.author, filter.sort
    )
}

/// Key for a single post lookup.
pub fn post_key(id: i64) -> String {
    format!("post.{id}")
}

/// Key for the most-recently-published ("popular") posts.
pub fn popular_key(generation: u64, limit: i64) -> String {
    format!("posts.popular.{generation}.{limit}")
}

/// Key for a cached view fragment: a rendered response body identified by a
/// name and an arbitrary data bag. The bag is hashed so the key stays short
/// and free of separator characters.
pub fn view_key(generation: u64, name: &str, data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    let hash = hex::encode(hasher.finalize());
    format!("view.{generation}.{name}.{hash}")
}
