//! Backend adapter for ProfileRepository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::client::BackendClient;
use crate::domain::entities::{UserId, UserProfile};
use crate::domain::ports::ProfileRepository;
use crate::error::DomainError;

const PROFILE_COLUMNS: &str = "id,username,expertise_level,reputation_points,total_reviews_given,\
total_submissions,accepted_reviews,weekly_review_streak,monthly_review_streak,created_at";

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: Uuid,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    expertise_level: Option<String>,
    #[serde(default)]
    reputation_points: Option<i32>,
    #[serde(default)]
    total_reviews_given: Option<i64>,
    #[serde(default)]
    total_submissions: Option<i64>,
    #[serde(default)]
    accepted_reviews: Option<i64>,
    #[serde(default)]
    weekly_review_streak: Option<i64>,
    #[serde(default)]
    monthly_review_streak: Option<i64>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        UserProfile {
            id: UserId(row.id),
            username: row.username.unwrap_or_default(),
            expertise_level: row.expertise_level.and_then(|s| s.parse().ok()),
            reputation_points: row.reputation_points.unwrap_or(0),
            total_reviews_given: row.total_reviews_given.unwrap_or(0),
            total_submissions: row.total_submissions.unwrap_or(0),
            accepted_reviews: row.accepted_reviews.unwrap_or(0),
            weekly_review_streak: row.weekly_review_streak.unwrap_or(0),
            monthly_review_streak: row.monthly_review_streak.unwrap_or(0),
            created_at: row.created_at,
        }
    }
}

/// Profiles stored in the backend's `profiles` table
pub struct BackendProfileRepository {
    client: Arc<BackendClient>,
}

impl BackendProfileRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for BackendProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let rows: Vec<ProfileRow> = self
            .client
            .get(&format!(
                "profiles?select={}&id=eq.{}&limit=1",
                PROFILE_COLUMNS, id
            ))
            .await?;

        Ok(rows.into_iter().next().map(Into::into))
    }
}
