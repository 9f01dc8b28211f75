//! Application services orchestrating domain logic.

pub mod engagement_service;
pub mod post_service;
pub mod stats_service;

pub use engagement_service::{EngagementFlags, EngagementService};
pub use post_service::PostService;
pub use stats_service::StatsService;
