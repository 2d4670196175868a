//! Domain entities
//!
//! Pure domain models and the pure functions over them. Nothing in here
//! performs I/O.

pub mod achievement;
pub mod feed_item;
pub mod profile;
pub mod reputation;
pub mod status;
pub mod submission;

use serde::{Deserialize, Deserializer};

#[allow(unused_imports)]
pub use achievement::{
    evaluate, AchievementCategory, AchievementMetrics, AchievementRule, AchievementUnlock,
    AchievementUnlockResult, ThresholdMetric,
};
#[allow(unused_imports)]
pub use feed_item::{project, FeedAuthor, FeedDisplayItem, FeedUser, RawCodeSnippet, RawFeedItem};
#[allow(unused_imports)]
pub use profile::{ExpertiseLevel, UserId, UserProfile};
#[allow(unused_imports)]
pub use reputation::{
    count_words, detailed_review_streak, score, QualityTier, ReputationAward, ReviewSubmission,
};
#[allow(unused_imports)]
pub use status::{
    classify, normalize_status, CanonicalStatus, APPROVED_SPELLINGS, CHANGES_REQUESTED_SPELLINGS,
};
#[allow(unused_imports)]
pub use submission::{
    completion_rate, DashboardStats, SubmissionApprovalAward, SubmissionRecord,
    SUBMISSION_APPROVED_POINTS,
};

/// Deserialize null as the type's default (empty string, zero, false)
pub(crate) fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
