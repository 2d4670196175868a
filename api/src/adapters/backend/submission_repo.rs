//! Backend adapter for SubmissionRepository

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use super::client::BackendClient;
use super::status_filter::status_param;
use crate::domain::entities::{CanonicalStatus, SubmissionRecord, UserId};
use crate::domain::ports::SubmissionRepository;
use crate::error::DomainError;

#[derive(Debug, Deserialize)]
struct SnippetRow {
    id: Uuid,
    user_id: Uuid,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<SnippetRow> for SubmissionRecord {
    fn from(row: SnippetRow) -> Self {
        SubmissionRecord {
            id: row.id.to_string(),
            user_id: UserId(row.user_id),
            title: row.title.unwrap_or_default(),
            language: row.language,
            raw_status: row.status.unwrap_or_default(),
        }
    }
}

/// Count path for every submission that classifies as pending
fn pending_count_path() -> String {
    format!(
        "code_snippets?select=id&{}",
        status_param("", CanonicalStatus::Pending)
    )
}

/// Submissions stored in the backend's `code_snippets` table
pub struct BackendSubmissionRepository {
    client: Arc<BackendClient>,
}

impl BackendSubmissionRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

const SNIPPET_COLUMNS: &str = "id,user_id,title,language,status";

#[async_trait]
impl SubmissionRepository for BackendSubmissionRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<SubmissionRecord>, DomainError> {
        let rows: Vec<SnippetRow> = self
            .client
            .get(&format!(
                "code_snippets?select={}&id=eq.{}&limit=1",
                SNIPPET_COLUMNS,
                urlencoding::encode(id)
            ))
            .await?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<SubmissionRecord>, DomainError> {
        let rows: Vec<SnippetRow> = self
            .client
            .get(&format!(
                "code_snippets?select={}&user_id=eq.{}&order=created_at.desc",
                SNIPPET_COLUMNS, user_id
            ))
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_pending(&self) -> Result<i64, DomainError> {
        Ok(self.client.count(&pending_count_path()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keeps_raw_status() {
        let row: SnippetRow = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000002","user_id":"00000000-0000-0000-0000-000000000001","title":"Parser","status":"Changes Requested"}"#,
        )
        .unwrap();
        let record: SubmissionRecord = row.into();

        assert_eq!(record.raw_status, "Changes Requested");
        assert_eq!(record.status(), CanonicalStatus::ChangesRequested);
        assert!(record.language.is_none());
    }

    #[test]
    fn pending_count_uses_classifier_pattern() {
        let path = pending_count_path();
        assert!(path.starts_with("code_snippets?select=id&or="));
        assert!(!path.contains("eq.pending"));
    }
}
