//! Reputation configuration constants
//!
//! Point values for achievements and the thresholds of the built-in rule
//! table. Per-review scoring constants live next to the scorer and are
//! re-exported here.

#[allow(unused_imports)]
pub use crate::domain::entities::reputation::{
    QUALITY_DETAILED_POINTS, QUALITY_MEDIUM_POINTS, QUALITY_SHORT_POINTS, REVIEW_ACCEPTED_POINTS,
    REVIEW_GIVEN_POINTS,
};

/// Bonus for giving a first review
pub const FIRST_REVIEW_POINTS: i32 = 25;

/// Bonus for reaching ten reviews
pub const TENTH_REVIEW_POINTS: i32 = 100;

/// Reviews needed for the tenth-review milestone
pub const TENTH_REVIEW_THRESHOLD: i64 = 10;

/// Bonus for a run of detailed reviews
pub const QUALITY_STREAK_POINTS: i32 = 50;

/// Consecutive detailed reviews needed for the quality streak
pub const QUALITY_STREAK_LENGTH: i64 = 5;

/// Bonus for a first accepted review
pub const FIRST_ACCEPTED_POINTS: i32 = 30;

/// Bonus for a first code submission
pub const CODE_SUBMISSION_POINTS: i32 = 5;

/// Bonus for reviewing at least once a week
pub const WEEKLY_STREAK_POINTS: i32 = 20;

/// Bonus for keeping the weekly streak for a month
pub const MONTHLY_STREAK_POINTS: i32 = 50;

/// Consecutive weeks that count as a monthly streak
pub const MONTHLY_STREAK_WEEKS: i64 = 4;
