//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain functions and ports.

pub mod dashboard_service;
pub mod feed_service;
pub mod reputation_config;
pub mod reputation_service;

pub use dashboard_service::DashboardService;
pub use feed_service::{FeedPage, FeedService, ProjectedActivity};
// Re-export reputation config for public API (constants used by consumers)
#[allow(unused_imports)]
pub use reputation_config::*;
pub use reputation_service::{
    load_achievement_rules, ApprovalCredit, ReputationService, ReputationSummary,
};
