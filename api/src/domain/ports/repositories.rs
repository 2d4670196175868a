//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., the hosted backend's REST API).

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::entities::{
    AchievementRule, RawFeedItem, ReputationAward, ReviewSubmission, SubmissionApprovalAward,
    SubmissionRecord, UserId, UserProfile,
};
use crate::domain::ports::FeedQuery;
use crate::error::DomainError;

/// Reviews written by users
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// All reviews a user has given, oldest first
    async fn fetch_reviews_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReviewSubmission>, DomainError>;

    /// Number of reviews a user has given
    async fn count_by_reviewer(&self, user_id: &UserId) -> Result<i64, DomainError>;
}

/// Static achievement configuration
#[async_trait]
pub trait AchievementRuleRepository: Send + Sync {
    /// Load the rule set; called once at startup
    async fn fetch_achievement_rules(&self) -> Result<Vec<AchievementRule>, DomainError>;
}

/// Write-backs for awarded points and unlocked achievements
#[async_trait]
pub trait ReputationLedger: Send + Sync {
    /// Record an award against a user's reputation
    async fn persist_award(
        &self,
        user_id: &UserId,
        award: &ReputationAward,
    ) -> Result<(), DomainError>;

    /// Record that a user unlocked an achievement and credit its points.
    ///
    /// Both happen together or not at all.
    async fn persist_unlock(
        &self,
        user_id: &UserId,
        rule: &AchievementRule,
    ) -> Result<(), DomainError>;

    /// Credit the author of an approved submission.
    ///
    /// Returns false when the submission was already credited.
    async fn persist_submission_approval(
        &self,
        award: &SubmissionApprovalAward,
    ) -> Result<bool, DomainError>;

    /// Ids of every achievement the user already holds
    async fn find_unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<String>, DomainError>;
}

/// User profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;
}

/// Code submissions
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<SubmissionRecord>, DomainError>;

    /// Submissions authored by a user
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<SubmissionRecord>, DomainError>;

    /// Submissions across the platform still waiting for review
    async fn count_pending(&self) -> Result<i64, DomainError>;
}

/// Activity feed records
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// One page of raw records plus the total number matching the query
    async fn list(&self, query: &FeedQuery) -> Result<(Vec<RawFeedItem>, i64), DomainError>;
}
