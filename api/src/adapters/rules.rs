//! Built-in achievement rules
//!
//! The default rule table, used when the backend doesn't provide one.

use async_trait::async_trait;

use crate::app::reputation_config::{
    CODE_SUBMISSION_POINTS, FIRST_ACCEPTED_POINTS, FIRST_REVIEW_POINTS, MONTHLY_STREAK_POINTS,
    MONTHLY_STREAK_WEEKS, QUALITY_STREAK_LENGTH, QUALITY_STREAK_POINTS, TENTH_REVIEW_POINTS,
    TENTH_REVIEW_THRESHOLD, WEEKLY_STREAK_POINTS,
};
use crate::domain::entities::{AchievementCategory, AchievementRule, ThresholdMetric};
use crate::domain::ports::AchievementRuleRepository;
use crate::error::DomainError;

fn rule(
    id: &str,
    name: &str,
    description: &str,
    category: AchievementCategory,
    threshold_metric: ThresholdMetric,
    threshold_value: i64,
    points_value: i32,
) -> AchievementRule {
    AchievementRule {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        threshold_metric,
        threshold_value,
        points_value,
    }
}

/// The default achievement table
pub fn builtin_rules() -> Vec<AchievementRule> {
    vec![
        rule(
            "first_review",
            "First Review",
            "Gave your first code review",
            AchievementCategory::Review,
            ThresholdMetric::ReviewsGiven,
            1,
            FIRST_REVIEW_POINTS,
        ),
        rule(
            "tenth_review",
            "Dedicated Reviewer",
            "Gave ten code reviews",
            AchievementCategory::Review,
            ThresholdMetric::ReviewsGiven,
            TENTH_REVIEW_THRESHOLD,
            TENTH_REVIEW_POINTS,
        ),
        rule(
            "quality_streak",
            "Quality Streak",
            "Wrote five detailed reviews in a row",
            AchievementCategory::Review,
            ThresholdMetric::DetailedReviewStreak,
            QUALITY_STREAK_LENGTH,
            QUALITY_STREAK_POINTS,
        ),
        rule(
            "first_submission",
            "First Submission",
            "Submitted code for review",
            AchievementCategory::Submission,
            ThresholdMetric::Submissions,
            1,
            CODE_SUBMISSION_POINTS,
        ),
        rule(
            "first_accepted_review",
            "Helpful Reviewer",
            "Had a review marked as accepted",
            AchievementCategory::Community,
            ThresholdMetric::AcceptedReviews,
            1,
            FIRST_ACCEPTED_POINTS,
        ),
        rule(
            "weekly_streak",
            "Weekly Streak",
            "Started a weekly review streak",
            AchievementCategory::Streak,
            ThresholdMetric::StreakWeeks,
            1,
            WEEKLY_STREAK_POINTS,
        ),
        rule(
            "monthly_streak",
            "Monthly Streak",
            "Kept a weekly review streak for a month",
            AchievementCategory::Streak,
            ThresholdMetric::StreakWeeks,
            MONTHLY_STREAK_WEEKS,
            MONTHLY_STREAK_POINTS,
        ),
    ]
}

/// Serves [`builtin_rules`]
pub struct StaticAchievementRules;

#[async_trait]
impl AchievementRuleRepository for StaticAchievementRules {
    async fn fetch_achievement_rules(&self) -> Result<Vec<AchievementRule>, DomainError> {
        Ok(builtin_rules())
    }
}
