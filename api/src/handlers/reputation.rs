//! Reputation handlers
//!
//! Scoring, history and achievement endpoints for a user.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::{ApprovalCredit, ReputationSummary};
use crate::domain::entities::{
    score, AchievementUnlock, ReputationAward, ReviewSubmission, UserId,
};
use crate::error::AppError;
use crate::AppState;

/// POST /reputation/score
///
/// Scores a review without recording anything.
pub async fn score_review(Json(review): Json<ReviewSubmission>) -> Json<ReputationAward> {
    Json(score(&review))
}

/// GET /users/:id/reputation
pub async fn get_reputation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReputationSummary>, AppError> {
    let summary = state.reputation_service.score_history(&UserId(id)).await?;
    Ok(Json(summary))
}

/// POST /users/:id/reviews/award
pub async fn award_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(review): Json<ReviewSubmission>,
) -> Result<Json<ReputationAward>, AppError> {
    let award = state
        .reputation_service
        .award_review(&UserId(id), &review)
        .await?;
    Ok(Json(award))
}

/// POST /submissions/:id/approval-award
///
/// Credits the author of an approved submission. Repeated calls report
/// `credited: false` instead of paying twice.
pub async fn award_submission_approval(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApprovalCredit>, AppError> {
    let credit = state
        .reputation_service
        .award_submission_approval(&id)
        .await?;
    Ok(Json(credit))
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub unlocks: Vec<AchievementUnlock>,
    pub total_points: i32,
}

/// POST /users/:id/achievements/evaluate
///
/// Unlocks whatever the user now qualifies for. An empty list means nothing new.
pub async fn evaluate_achievements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let result = state
        .reputation_service
        .evaluate_achievements(&UserId(id))
        .await?;
    let total_points = result.total_points();

    Ok(Json(EvaluateResponse {
        unlocks: result.unlocks,
        total_points,
    }))
}
