//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod backend;
pub mod rules;

pub use backend::{
    BackendAchievementRuleRepository, BackendClient, BackendFeedRepository,
    BackendProfileRepository, BackendReputationLedger, BackendReviewRepository,
    BackendSubmissionRepository, PollingActivityStream,
};
pub use rules::{builtin_rules, StaticAchievementRules};
