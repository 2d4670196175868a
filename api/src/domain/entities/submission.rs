//! Code submission domain entity
//!
//! A snippet a user posted for review, plus the dashboard statistics derived
//! from a user's submissions.

use serde::{Deserialize, Serialize};

use super::profile::UserId;
use super::status::{classify, CanonicalStatus};

/// Points credited to an author when their submission is approved
pub const SUBMISSION_APPROVED_POINTS: i32 = 8;

/// A submitted code snippet as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub user_id: UserId,
    pub title: String,
    pub language: Option<String>,
    /// Raw stored status, see [`SubmissionRecord::status`]
    pub raw_status: String,
}

impl SubmissionRecord {
    pub fn status(&self) -> CanonicalStatus {
        classify(&self.raw_status)
    }

    /// Points owed to the author, present once the submission is approved
    pub fn approval_award(&self) -> Option<SubmissionApprovalAward> {
        (self.status() == CanonicalStatus::Approved).then(|| SubmissionApprovalAward {
            submission_id: self.id.clone(),
            user_id: self.user_id,
            points: SUBMISSION_APPROVED_POINTS,
        })
    }
}

/// Credit for an approved submission; paid at most once per submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionApprovalAward {
    pub submission_id: String,
    pub user_id: UserId,
    pub points: i32,
}

/// Headline numbers for a user's dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_submissions: i64,
    pub total_reviews: i64,
    pub pending_reviews: i64,
    pub reputation_points: i32,
    pub review_streak: i64,
    /// Percentage of submissions that were approved, 0 when there are none
    pub completion_rate: f64,
}

/// Percentage of submissions whose status classifies as approved.
///
/// Both `approved` and the legacy `completed` literal count.
pub fn completion_rate(submissions: &[SubmissionRecord]) -> f64 {
    if submissions.is_empty() {
        return 0.0;
    }
    let approved = submissions
        .iter()
        .filter(|s| s.status() == CanonicalStatus::Approved)
        .count();
    approved as f64 / submissions.len() as f64 * 100.0
}
