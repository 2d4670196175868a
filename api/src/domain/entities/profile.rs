//! User profile domain entity
//!
//! Read-model of a user's cumulative review activity. Counters are maintained
//! by the backend; this service only reads them to derive achievements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::achievement::AchievementMetrics;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported experience level shown on the profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl std::fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpertiseLevel::Beginner => write!(f, "beginner"),
            ExpertiseLevel::Intermediate => write!(f, "intermediate"),
            ExpertiseLevel::Advanced => write!(f, "advanced"),
            ExpertiseLevel::Expert => write!(f, "expert"),
        }
    }
}

impl std::str::FromStr for ExpertiseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(ExpertiseLevel::Beginner),
            "intermediate" => Ok(ExpertiseLevel::Intermediate),
            "advanced" => Ok(ExpertiseLevel::Advanced),
            "expert" => Ok(ExpertiseLevel::Expert),
            _ => Err(format!("Unknown expertise level: {}", s)),
        }
    }
}

/// A user's profile with reputation counters
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub expertise_level: Option<ExpertiseLevel>,
    pub reputation_points: i32,
    pub total_reviews_given: i64,
    pub total_submissions: i64,
    pub accepted_reviews: i64,
    pub weekly_review_streak: i64,
    pub monthly_review_streak: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Counters the achievement evaluator works from.
    ///
    /// The detailed review streak is not stored on the profile and is left
    /// at zero for the caller to fill from the review history.
    pub fn metrics(&self) -> AchievementMetrics {
        AchievementMetrics {
            reviews_given: self.total_reviews_given,
            submissions: self.total_submissions,
            streak_weeks: self.weekly_review_streak,
            accepted_reviews: self.accepted_reviews,
            detailed_review_streak: 0,
        }
    }
}
