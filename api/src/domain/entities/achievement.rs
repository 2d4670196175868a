//! Achievement domain entity
//!
//! Achievements are static rules ("give your tenth review") evaluated against
//! a user's cumulative counters. Evaluation is a pure projection: recording an
//! unlock is left to the caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Achievement grouping, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Review,
    Submission,
    Community,
    Streak,
}

impl std::fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AchievementCategory::Review => write!(f, "review"),
            AchievementCategory::Submission => write!(f, "submission"),
            AchievementCategory::Community => write!(f, "community"),
            AchievementCategory::Streak => write!(f, "streak"),
        }
    }
}

impl std::str::FromStr for AchievementCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "review" => Ok(AchievementCategory::Review),
            "submission" => Ok(AchievementCategory::Submission),
            "community" => Ok(AchievementCategory::Community),
            "streak" => Ok(AchievementCategory::Streak),
            _ => Err(format!("Unknown achievement category: {}", s)),
        }
    }
}

/// The counter a rule's threshold is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMetric {
    ReviewsGiven,
    Submissions,
    AcceptedReviews,
    StreakWeeks,
    /// Longest run of consecutive detailed reviews
    DetailedReviewStreak,
}

impl std::fmt::Display for ThresholdMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdMetric::ReviewsGiven => write!(f, "reviews_given"),
            ThresholdMetric::Submissions => write!(f, "submissions"),
            ThresholdMetric::AcceptedReviews => write!(f, "accepted_reviews"),
            ThresholdMetric::StreakWeeks => write!(f, "streak_weeks"),
            ThresholdMetric::DetailedReviewStreak => write!(f, "detailed_review_streak"),
        }
    }
}

impl std::str::FromStr for ThresholdMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reviews_given" => Ok(ThresholdMetric::ReviewsGiven),
            "submissions" => Ok(ThresholdMetric::Submissions),
            "accepted_reviews" => Ok(ThresholdMetric::AcceptedReviews),
            "streak_weeks" => Ok(ThresholdMetric::StreakWeeks),
            "detailed_review_streak" => Ok(ThresholdMetric::DetailedReviewStreak),
            _ => Err(format!("Unknown threshold metric: {}", s)),
        }
    }
}

/// A milestone that unlocks once its metric reaches the threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub threshold_metric: ThresholdMetric,
    pub threshold_value: i64,
    pub points_value: i32,
}

/// Cumulative counters for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementMetrics {
    pub reviews_given: i64,
    pub submissions: i64,
    pub streak_weeks: i64,
    pub accepted_reviews: i64,
    pub detailed_review_streak: i64,
}

impl AchievementMetrics {
    pub fn value_of(&self, metric: ThresholdMetric) -> i64 {
        match metric {
            ThresholdMetric::ReviewsGiven => self.reviews_given,
            ThresholdMetric::Submissions => self.submissions,
            ThresholdMetric::AcceptedReviews => self.accepted_reviews,
            ThresholdMetric::StreakWeeks => self.streak_weeks,
            ThresholdMetric::DetailedReviewStreak => self.detailed_review_streak,
        }
    }
}

/// A rule that fired, with the metric value that triggered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementUnlock {
    pub rule: AchievementRule,
    pub metric_value: i64,
}

/// Rules that fired in one evaluation, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AchievementUnlockResult {
    pub unlocks: Vec<AchievementUnlock>,
}

impl AchievementUnlockResult {
    pub fn is_empty(&self) -> bool {
        self.unlocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.unlocks.len()
    }

    /// Sum of the point values of every unlocked rule
    pub fn total_points(&self) -> i32 {
        self.unlocks.iter().map(|u| u.rule.points_value).sum()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.unlocks.iter().map(|u| u.rule.id.as_str()).collect()
    }
}

/// Evaluate every rule against the metrics.
///
/// A rule fires when its metric is at or above the threshold and its id is not
/// in `unlocked_ids`. Output is ordered by category, then threshold, then id.
pub fn evaluate(
    rules: &[AchievementRule],
    metrics: &AchievementMetrics,
    unlocked_ids: &HashSet<String>,
) -> AchievementUnlockResult {
    let mut unlocks: Vec<AchievementUnlock> = rules
        .iter()
        .filter(|rule| !unlocked_ids.contains(&rule.id))
        .filter_map(|rule| {
            let metric_value = metrics.value_of(rule.threshold_metric);
            (metric_value >= rule.threshold_value).then(|| AchievementUnlock {
                rule: rule.clone(),
                metric_value,
            })
        })
        .collect();

    unlocks.sort_by(|a, b| {
        a.rule
            .category
            .cmp(&b.rule.category)
            .then(a.rule.threshold_value.cmp(&b.rule.threshold_value))
            .then_with(|| a.rule.id.cmp(&b.rule.id))
    });

    AchievementUnlockResult { unlocks }
}
