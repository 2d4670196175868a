//! Backend adapter for ReviewRepository

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::client::BackendClient;
use crate::domain::entities::{ReviewSubmission, UserId};
use crate::domain::ports::ReviewRepository;
use crate::error::DomainError;

#[derive(Debug, Deserialize)]
struct ReviewRow {
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    is_accepted: Option<bool>,
}

impl From<ReviewRow> for ReviewSubmission {
    fn from(row: ReviewRow) -> Self {
        ReviewSubmission {
            content: row.comment.unwrap_or_default(),
            is_accepted: row.is_accepted.unwrap_or(false),
        }
    }
}

/// Reviews stored in the backend's `reviews` table
pub struct BackendReviewRepository {
    client: Arc<BackendClient>,
}

impl BackendReviewRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewRepository for BackendReviewRepository {
    async fn fetch_reviews_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReviewSubmission>, DomainError> {
        let rows: Vec<ReviewRow> = self
            .client
            .get(&format!(
                "reviews?select=comment,is_accepted&reviewer_id=eq.{}&order=created_at.asc",
                user_id
            ))
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_reviewer(&self, user_id: &UserId) -> Result<i64, DomainError> {
        Ok(self
            .client
            .count(&format!("reviews?select=id&reviewer_id=eq.{}", user_id))
            .await?)
    }
}
