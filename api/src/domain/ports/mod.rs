//! Domain ports (traits)
//!
//! Port traits define interfaces to the hosted backend this service relies on.
//! Adapters provide concrete implementations of these traits.

pub mod activity;
pub mod feed;
pub mod repositories;

pub use activity::{ActivityFilter, ActivityStream, ActivitySubscription};
pub use feed::{FeedFilter, FeedQuery, FeedSort, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use repositories::{
    AchievementRuleRepository, FeedRepository, ProfileRepository, ReputationLedger,
    ReviewRepository, SubmissionRepository,
};
