//! Per-dataset TTL policy.
//!
//! Listing and search results churn whenever a new post lands, so they get
//! a moderate TTL. The author roster only changes when a new author
//! publishes for the first time and is cached longest. Statistics are cheap
//! to recompute but sit on dashboards, so a short TTL bounds staleness.

use std::time::Duration;

/// Published-list pages.
pub const POSTS_LIST: Duration = Duration::from_secs(30 * 60);

/// Single-post lookups.
pub const POST_DETAIL: Duration = Duration::from_secs(60 * 60);

/// Distinct author roster.
pub const AUTHORS_LIST: Duration = Duration::from_secs(120 * 60);

/// Aggregate statistics snapshot.
pub const STATS: Duration = Duration::from_secs(15 * 60);

/// Cached view fragments (response bodies).
pub const VIEW_FRAGMENT: Duration = Duration::from_secs(60 * 60);

/// Popular ("most recently published") posts.
pub const POPULAR: Duration = Duration::from_secs(120 * 60);

/// Bookkeeping entries (generation counter, last warm-up marker). These are
/// not query results; they just need to outlive everything they govern.
pub const BOOKKEEPING: Duration = Duration::from_secs(30 * 24 * 60 * 60);
