//! Reputation service
//!
//! Scores reviews and evaluates achievements for a user, then hands the
//! results to the ledger. Scoring and evaluation are pure; this service only
//! adds the reads and write-backs around them.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{
    detailed_review_streak, evaluate, score, AchievementRule, AchievementUnlockResult,
    ReputationAward, ReviewSubmission, SubmissionApprovalAward, UserId,
};
use crate::domain::ports::{
    AchievementRuleRepository, ProfileRepository, ReputationLedger, ReviewRepository,
    SubmissionRepository,
};
use crate::error::{AppError, DomainError};

/// Result of scoring a user's whole review history
#[derive(Debug, Clone, Serialize)]
pub struct ReputationSummary {
    pub user_id: UserId,
    pub reviews_scored: usize,
    pub total_points: i64,
    pub awards: Vec<ReputationAward>,
}

/// Outcome of crediting an approved submission
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalCredit {
    #[serde(flatten)]
    pub award: SubmissionApprovalAward,
    /// False when the submission had already been credited
    pub credited: bool,
}

/// Load the achievement rule table once, for sharing across services
pub async fn load_achievement_rules<R: AchievementRuleRepository>(
    repo: &R,
) -> Result<Arc<[AchievementRule]>, AppError> {
    let rules = repo.fetch_achievement_rules().await?;
    tracing::info!(count = rules.len(), "Achievement rules loaded");
    Ok(rules.into())
}

/// Service for reputation scoring and achievement unlocks
pub struct ReputationService<RR, PR, SR, LR>
where
    RR: ReviewRepository,
    PR: ProfileRepository,
    SR: SubmissionRepository,
    LR: ReputationLedger,
{
    reviews: Arc<RR>,
    profiles: Arc<PR>,
    submissions: Arc<SR>,
    ledger: Arc<LR>,
    rules: Arc<[AchievementRule]>,
}

impl<RR, PR, SR, LR> ReputationService<RR, PR, SR, LR>
where
    RR: ReviewRepository,
    PR: ProfileRepository,
    SR: SubmissionRepository,
    LR: ReputationLedger,
{
    pub fn new(
        reviews: Arc<RR>,
        profiles: Arc<PR>,
        submissions: Arc<SR>,
        ledger: Arc<LR>,
        rules: Arc<[AchievementRule]>,
    ) -> Self {
        Self {
            reviews,
            profiles,
            submissions,
            ledger,
            rules,
        }
    }

    /// Score a single review without persisting anything
    pub fn score_review(&self, submission: &ReviewSubmission) -> ReputationAward {
        let award = score(submission);
        tracing::debug!(
            words = submission.word_count(),
            tier = %award.quality_tier,
            accepted = submission.is_accepted,
            total = award.total,
            "Review scored"
        );
        award
    }

    /// Score every review a user has given
    pub async fn score_history(&self, user_id: &UserId) -> Result<ReputationSummary, AppError> {
        let reviews = self.reviews.fetch_reviews_for_user(user_id).await?;
        let awards: Vec<ReputationAward> = reviews.iter().map(score).collect();
        let total_points = awards.iter().map(|a| a.total as i64).sum();

        tracing::debug!(
            user_id = %user_id,
            reviews = awards.len(),
            total_points = total_points,
            "Review history scored"
        );

        Ok(ReputationSummary {
            user_id: *user_id,
            reviews_scored: awards.len(),
            total_points,
            awards,
        })
    }

    /// Score a review and record the award against the user
    pub async fn award_review(
        &self,
        user_id: &UserId,
        submission: &ReviewSubmission,
    ) -> Result<ReputationAward, AppError> {
        let award = self.score_review(submission);
        self.ledger.persist_award(user_id, &award).await?;

        tracing::info!(
            user_id = %user_id,
            total = award.total,
            quality_bonus = award.quality_bonus,
            accepted_bonus = award.accepted_bonus,
            "Reputation awarded"
        );

        Ok(award)
    }

    /// Credit the author of an approved submission, once per submission
    pub async fn award_submission_approval(
        &self,
        submission_id: &str,
    ) -> Result<ApprovalCredit, AppError> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Submission not found: {}", submission_id))
            })?;

        let award = submission.approval_award().ok_or_else(|| {
            DomainError::Validation(format!(
                "Submission {} is not approved (status: {})",
                submission_id,
                submission.status()
            ))
        })?;

        let credited = self.ledger.persist_submission_approval(&award).await?;
        if credited {
            tracing::info!(
                user_id = %award.user_id,
                submission_id = %award.submission_id,
                points = award.points,
                "Submission approval credited"
            );
        } else {
            tracing::debug!(
                submission_id = %award.submission_id,
                "Submission approval already credited"
            );
        }

        Ok(ApprovalCredit { award, credited })
    }

    /// Unlock every achievement the user now qualifies for.
    ///
    /// Already-held achievements never fire again, so calling this repeatedly
    /// is safe. Unlocks are persisted in result order; the first failing write
    /// aborts the rest. Each unlock records the achievement and credits its
    /// points in one write.
    pub async fn evaluate_achievements(
        &self,
        user_id: &UserId,
    ) -> Result<AchievementUnlockResult, AppError> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Profile not found: {}", user_id)))?;

        let reviews = self.reviews.fetch_reviews_for_user(user_id).await?;
        let mut metrics = profile.metrics();
        metrics.detailed_review_streak = detailed_review_streak(&reviews);

        let unlocked = self.ledger.find_unlocked_ids(user_id).await?;
        let result = evaluate(&self.rules, &metrics, &unlocked);

        for unlock in &result.unlocks {
            self.ledger.persist_unlock(user_id, &unlock.rule).await?;
            tracing::info!(
                user_id = %user_id,
                achievement = %unlock.rule.id,
                metric = %unlock.rule.threshold_metric,
                value = unlock.metric_value,
                points = unlock.rule.points_value,
                "Achievement unlocked"
            );
        }

        Ok(result)
    }
}
