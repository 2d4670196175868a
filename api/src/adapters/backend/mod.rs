//! Hosted backend adapter
//!
//! REST client plus implementations of every repository port against the
//! backend's tables and stored procedures.

pub mod activity;
pub mod client;
pub mod feed_repo;
pub mod ledger;
pub mod profile_repo;
pub mod review_repo;
pub mod rule_repo;
mod status_filter;
pub mod submission_repo;

pub use activity::PollingActivityStream;
pub use client::BackendClient;
pub use feed_repo::BackendFeedRepository;
pub use ledger::BackendReputationLedger;
pub use profile_repo::BackendProfileRepository;
pub use review_repo::BackendReviewRepository;
pub use rule_repo::BackendAchievementRuleRepository;
pub use submission_repo::BackendSubmissionRepository;
