//! Backend adapter for AchievementRuleRepository

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::client::BackendClient;
use crate::domain::entities::AchievementRule;
use crate::domain::ports::AchievementRuleRepository;
use crate::error::DomainError;

#[derive(Debug, Deserialize)]
struct AchievementRow {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    category: String,
    threshold_metric: String,
    threshold_value: i64,
    #[serde(default)]
    points_value: Option<i32>,
}

impl TryFrom<AchievementRow> for AchievementRule {
    type Error = String;

    fn try_from(row: AchievementRow) -> Result<Self, Self::Error> {
        Ok(AchievementRule {
            category: row.category.parse()?,
            threshold_metric: row.threshold_metric.parse()?,
            name: row.name.unwrap_or_else(|| row.id.clone()),
            description: row.description.unwrap_or_default(),
            threshold_value: row.threshold_value,
            points_value: row.points_value.unwrap_or(0),
            id: row.id,
        })
    }
}

/// Achievement definitions from the backend's `achievements` table
pub struct BackendAchievementRuleRepository {
    client: Arc<BackendClient>,
}

impl BackendAchievementRuleRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AchievementRuleRepository for BackendAchievementRuleRepository {
    async fn fetch_achievement_rules(&self) -> Result<Vec<AchievementRule>, DomainError> {
        let rows: Vec<AchievementRow> = self
            .client
            .get("achievements?select=id,name,description,category,threshold_metric,threshold_value,points_value")
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                match AchievementRule::try_from(row) {
                    Ok(rule) => Some(rule),
                    Err(e) => {
                        tracing::warn!(achievement = %id, error = %e, "Skipping achievement rule");
                        None
                    }
                }
            })
            .collect())
    }
}
