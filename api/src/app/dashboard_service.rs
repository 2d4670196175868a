//! Dashboard service
//!
//! Aggregates the headline numbers shown on a user's dashboard.

use std::sync::Arc;

use crate::domain::entities::{completion_rate, DashboardStats, UserId};
use crate::domain::ports::{ProfileRepository, ReviewRepository, SubmissionRepository};
use crate::error::{AppError, DomainError};

/// Service for dashboard statistics
pub struct DashboardService<SR, RR, PR>
where
    SR: SubmissionRepository,
    RR: ReviewRepository,
    PR: ProfileRepository,
{
    submissions: Arc<SR>,
    reviews: Arc<RR>,
    profiles: Arc<PR>,
}

impl<SR, RR, PR> DashboardService<SR, RR, PR>
where
    SR: SubmissionRepository,
    RR: ReviewRepository,
    PR: ProfileRepository,
{
    pub fn new(submissions: Arc<SR>, reviews: Arc<RR>, profiles: Arc<PR>) -> Self {
        Self {
            submissions,
            reviews,
            profiles,
        }
    }

    /// Build dashboard stats for a user
    pub async fn stats(&self, user_id: &UserId) -> Result<DashboardStats, AppError> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Profile not found: {}", user_id)))?;

        let submissions = self.submissions.find_by_user(user_id).await?;
        let total_reviews = self.reviews.count_by_reviewer(user_id).await?;
        let pending_reviews = self.submissions.count_pending().await?;

        Ok(DashboardStats {
            total_submissions: submissions.len() as i64,
            total_reviews,
            pending_reviews,
            reputation_points: profile.reputation_points,
            review_streak: profile.weekly_review_streak,
            completion_rate: completion_rate(&submissions),
        })
    }
}
