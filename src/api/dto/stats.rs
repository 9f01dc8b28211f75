//! Statistics response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::PostStatsSnapshot;

/// Aggregate post statistics as returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_posts: i64,
    pub total_authors: i64,
    pub latest_post_date: Option<DateTime<Utc>>,
    pub posts_this_month: i64,
}

impl From<PostStatsSnapshot> for StatsResponse {
    fn from(s: PostStatsSnapshot) -> Self {
        Self {
            total_posts: s.total_posts,
            total_authors: s.total_authors,
            latest_post_date: s.latest_post_date,
            posts_this_month: s.posts_this_month,
        }
    }
}

/// The distinct author roster.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorsResponse {
    pub authors: Vec<String>,
}
