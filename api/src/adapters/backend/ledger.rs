//! Backend adapter for ReputationLedger
//!
//! Every write is a single stored procedure call, so a write either lands in
//! full or not at all:
//! - `increment_reputation` bumps a point total without overwriting
//!   concurrent awards.
//! - `unlock_achievement` inserts the `user_achievements` row and credits the
//!   rule's points in one transaction.
//! - `award_submission_approval` records the credit in
//!   `submission_approval_awards` (keyed by submission) and bumps the total,
//!   returning false when the submission was already credited.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::BackendClient;
use crate::domain::entities::{AchievementRule, ReputationAward, SubmissionApprovalAward, UserId};
use crate::domain::ports::ReputationLedger;
use crate::error::DomainError;

#[derive(Debug, Serialize)]
struct IncrementReputation {
    user_id: Uuid,
    points: i32,
}

#[derive(Debug, Serialize)]
struct UnlockAchievement<'a> {
    user_id: Uuid,
    achievement_id: &'a str,
    points: i32,
}

#[derive(Debug, Serialize)]
struct AwardSubmissionApproval<'a> {
    user_id: Uuid,
    submission_id: &'a str,
    points: i32,
}

#[derive(Debug, Deserialize)]
struct UnlockedRow {
    achievement_id: String,
}

/// Reputation write-backs against the hosted backend
pub struct BackendReputationLedger {
    client: Arc<BackendClient>,
}

impl BackendReputationLedger {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReputationLedger for BackendReputationLedger {
    async fn persist_award(
        &self,
        user_id: &UserId,
        award: &ReputationAward,
    ) -> Result<(), DomainError> {
        self.client
            .rpc(
                "increment_reputation",
                &IncrementReputation {
                    user_id: user_id.0,
                    points: award.total,
                },
            )
            .await?;
        Ok(())
    }

    async fn persist_unlock(
        &self,
        user_id: &UserId,
        rule: &AchievementRule,
    ) -> Result<(), DomainError> {
        self.client
            .rpc(
                "unlock_achievement",
                &UnlockAchievement {
                    user_id: user_id.0,
                    achievement_id: &rule.id,
                    points: rule.points_value,
                },
            )
            .await?;
        Ok(())
    }

    async fn persist_submission_approval(
        &self,
        award: &SubmissionApprovalAward,
    ) -> Result<bool, DomainError> {
        let credited: bool = self
            .client
            .rpc_returning(
                "award_submission_approval",
                &AwardSubmissionApproval {
                    user_id: award.user_id.0,
                    submission_id: &award.submission_id,
                    points: award.points,
                },
            )
            .await?;
        Ok(credited)
    }

    async fn find_unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<String>, DomainError> {
        let rows: Vec<UnlockedRow> = self
            .client
            .get(&format!(
                "user_achievements?select=achievement_id&user_id=eq.{}",
                user_id
            ))
            .await?;

        Ok(rows.into_iter().map(|r| r.achievement_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_sends_points_with_the_row() {
        let args = UnlockAchievement {
            user_id: Uuid::nil(),
            achievement_id: "tenth_review",
            points: 100,
        };

        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            serde_json::json!({
                "user_id": "00000000-0000-0000-0000-000000000000",
                "achievement_id": "tenth_review",
                "points": 100
            })
        );
    }

    #[test]
    fn approval_award_keys_on_submission() {
        let args = AwardSubmissionApproval {
            user_id: Uuid::nil(),
            submission_id: "snippet-1",
            points: 8,
        };

        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(value["submission_id"], "snippet-1");
        assert_eq!(value["points"], 8);
    }
}
