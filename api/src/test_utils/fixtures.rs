//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{TimeZone, Utc};

use crate::domain::entities::{
    ExpertiseLevel, FeedUser, RawCodeSnippet, RawFeedItem, ReviewSubmission, SubmissionRecord,
    UserId, UserProfile,
};

/// Create a review with exactly `words` words
pub fn test_review(words: usize, accepted: bool) -> ReviewSubmission {
    let content = vec!["word"; words].join(" ");
    ReviewSubmission {
        content,
        is_accepted: accepted,
    }
}

/// Create a test profile with zeroed counters
pub fn test_profile() -> UserProfile {
    UserProfile {
        id: UserId::new(),
        username: "test-reviewer".to_string(),
        expertise_level: Some(ExpertiseLevel::Intermediate),
        reputation_points: 0,
        total_reviews_given: 0,
        total_submissions: 0,
        accepted_reviews: 0,
        weekly_review_streak: 0,
        monthly_review_streak: 0,
        created_at: None,
    }
}

/// Create a test profile with specific achievement counters
pub fn test_profile_with_metrics(
    reviews_given: i64,
    submissions: i64,
    streak_weeks: i64,
    accepted_reviews: i64,
) -> UserProfile {
    UserProfile {
        total_reviews_given: reviews_given,
        total_submissions: submissions,
        weekly_review_streak: streak_weeks,
        accepted_reviews,
        ..test_profile()
    }
}

/// Create a titled feed item without a submission
pub fn test_feed_item(id: &str) -> RawFeedItem {
    RawFeedItem {
        id: id.to_string(),
        title: Some(format!("Activity {}", id)),
        description: Some("Joined the community".to_string()),
        created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()),
        user_id: Some("user-1".to_string()),
        user: Some(FeedUser {
            id: Some("user-1".to_string()),
            username: "ada".to_string(),
            avatar_url: None,
        }),
        code_snippet: None,
    }
}

/// Create a feed item with a submission in the given raw status
pub fn test_feed_item_with_snippet(id: &str, status: &str) -> RawFeedItem {
    RawFeedItem {
        code_snippet: Some(RawCodeSnippet {
            id: format!("snippet-{}", id),
            title: Some(format!("Snippet {}", id)),
            description: Some("Please review my parser".to_string()),
            language: Some("rust".to_string()),
            status: Some(status.to_string()),
            review_count: 2,
            comment_count: 5,
            external_link: None,
        }),
        ..test_feed_item(id)
    }
}

/// Create a submission owned by `user_id` with the given raw status
pub fn test_submission(user_id: UserId, status: &str) -> SubmissionRecord {
    SubmissionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        user_id,
        title: "Binary search".to_string(),
        language: Some("rust".to_string()),
        raw_status: status.to_string(),
    }
}
