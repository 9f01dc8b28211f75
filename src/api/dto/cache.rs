//! Cache administration DTOs.

use serde::{Deserialize, Serialize};

use super::stats::StatsResponse;

/// Summary of a warm-up run.
#[derive(Debug, Serialize, Deserialize)]
pub struct WarmupResponse {
    pub warmed: Vec<String>,
    pub elapsed_ms: u64,
    pub warmed_at: String,
}

/// Acknowledgement of a full cache flush.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub flushed: bool,
}

/// Cache diagnostics: configuration plus current producer output.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub driver: String,
    pub enabled: bool,
    /// "targeted" or "flush".
    pub invalidation: String,
    /// RFC 3339, or null when no warm-up ran since the last flush.
    pub last_warmup: Option<String>,
    pub stats: StatsResponse,
    pub cached_authors: usize,
}
