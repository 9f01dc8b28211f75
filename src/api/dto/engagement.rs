//! Session engagement DTOs.

use serde::{Deserialize, Serialize};

/// Result of a like/bookmark toggle.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub post_id: i64,
    /// "like", "unlike", "bookmark", or "unbookmark".
    pub action: String,
    /// New state of the flag after the toggle.
    pub active: bool,
}

/// Current flags for the caller's session.
#[derive(Debug, Serialize, Deserialize)]
pub struct EngagementResponse {
    pub post_id: i64,
    pub liked: bool,
    pub bookmarked: bool,
}

/// Canonical URL handed out by the share action.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShareResponse {
    pub post_id: i64,
    pub url: String,
}
