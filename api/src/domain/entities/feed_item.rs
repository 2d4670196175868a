//! Feed item domain entity
//!
//! Activity records arrive from the backend (paged queries and the change
//! stream) in a loose shape: every field may be missing or null. `project`
//! turns them into a uniform display item or drops them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_null_default;
use super::status::{classify, CanonicalStatus};

/// Author of an activity record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A code submission joined onto an activity record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCodeSnippet {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Stored status, possibly a legacy synonym
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub review_count: i64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub comment_count: i64,
    #[serde(default)]
    pub external_link: Option<String>,
}

/// An activity record as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeedItem {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user: Option<FeedUser>,
    #[serde(default)]
    pub code_snippet: Option<RawCodeSnippet>,
}

/// Author identity exposed on a display item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedAuthor {
    pub id: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// A renderable feed row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedDisplayItem {
    pub id: String,
    pub snippet_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub language: Option<String>,
    /// Always canonical; present only when a submission is attached
    pub status: Option<CanonicalStatus>,
    pub review_count: i64,
    pub comment_count: i64,
    pub external_link: Option<String>,
    pub author: Option<FeedAuthor>,
    pub created_at: Option<DateTime<Utc>>,
}

fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Shape a raw record for display.
///
/// Returns `None` when the record has neither an attached submission nor a
/// title of its own.
pub fn project(item: &RawFeedItem) -> Option<FeedDisplayItem> {
    let own_title = non_empty(item.title.as_ref());
    let own_description = non_empty(item.description.as_ref());

    let author = item.user.as_ref().map(|user| FeedAuthor {
        id: user.id.clone().or_else(|| item.user_id.clone()),
        username: user.username.clone(),
        avatar_url: user.avatar_url.clone(),
    });

    match &item.code_snippet {
        Some(snippet) => Some(FeedDisplayItem {
            id: item.id.clone(),
            snippet_id: Some(snippet.id.clone()),
            title: non_empty(snippet.title.as_ref())
                .or(own_title)
                .cloned()
                .unwrap_or_default(),
            description: non_empty(snippet.description.as_ref())
                .or(own_description)
                .cloned(),
            language: snippet.language.clone(),
            status: Some(classify(snippet.status.as_deref().unwrap_or_default())),
            review_count: snippet.review_count,
            comment_count: snippet.comment_count,
            external_link: snippet.external_link.clone(),
            author,
            created_at: item.created_at,
        }),
        None => {
            let title = own_title?;
            Some(FeedDisplayItem {
                id: item.id.clone(),
                snippet_id: None,
                title: title.clone(),
                description: own_description.cloned(),
                language: None,
                status: None,
                review_count: 0,
                comment_count: 0,
                external_link: None,
                author,
                created_at: item.created_at,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(status: &str) -> RawCodeSnippet {
        RawCodeSnippet {
            id: "snippet-1".to_string(),
            title: Some("Binary search".to_string()),
            description: Some("Is this off by one?".to_string()),
            language: Some("rust".to_string()),
            status: Some(status.to_string()),
            review_count: 3,
            comment_count: 7,
            external_link: Some("https://example.com/gist".to_string()),
        }
    }

    fn item() -> RawFeedItem {
        RawFeedItem {
            id: "item-1".to_string(),
            title: Some("Submitted new code".to_string()),
            description: Some("Feed description".to_string()),
            created_at: None,
            user_id: Some("user-1".to_string()),
            user: Some(FeedUser {
                id: None,
                username: "alice".to_string(),
                avatar_url: None,
            }),
            code_snippet: None,
        }
    }

    #[test]
    fn drops_items_without_title_or_snippet() {
        let mut raw = item();
        raw.title = None;
        assert!(project(&raw).is_none());

        raw.title = Some("   ".to_string());
        assert!(project(&raw).is_none());

        assert!(project(&RawFeedItem::default()).is_none());
    }

    #[test]
    fn keeps_titled_items_without_snippet() {
        let projected = project(&item()).unwrap();
        assert_eq!(projected.title, "Submitted new code");
        assert_eq!(projected.description.as_deref(), Some("Feed description"));
        assert!(projected.status.is_none());
        assert!(projected.snippet_id.is_none());
    }

    #[test]
    fn snippet_fields_take_precedence() {
        let mut raw = item();
        raw.code_snippet = Some(snippet("pending"));
        let projected = project(&raw).unwrap();

        assert_eq!(projected.title, "Binary search");
        assert_eq!(projected.description.as_deref(), Some("Is this off by one?"));
        assert_eq!(projected.language.as_deref(), Some("rust"));
        assert_eq!(projected.review_count, 3);
        assert_eq!(projected.comment_count, 7);
        assert_eq!(
            projected.external_link.as_deref(),
            Some("https://example.com/gist")
        );
        assert_eq!(projected.snippet_id.as_deref(), Some("snippet-1"));
    }

    #[test]
    fn snippet_without_any_title_is_still_renderable() {
        let mut raw = item();
        raw.title = None;
        let mut s = snippet("approved");
        s.title = None;
        s.description = Some(String::new());
        raw.code_snippet = Some(s);

        let projected = project(&raw).unwrap();
        assert_eq!(projected.title, "");
        assert_eq!(projected.description.as_deref(), Some("Feed description"));
    }

    #[test]
    fn snippet_status_is_canonicalized() {
        let cases = [
            ("completed", CanonicalStatus::Approved),
            ("Changes Requested", CanonicalStatus::ChangesRequested),
            ("reviewed", CanonicalStatus::Pending),
            ("", CanonicalStatus::Pending),
        ];
        for (raw_status, expected) in cases {
            let mut raw = item();
            raw.code_snippet = Some(snippet(raw_status));
            assert_eq!(project(&raw).unwrap().status, Some(expected));
        }

        let mut raw = item();
        let mut s = snippet("approved");
        s.status = None;
        raw.code_snippet = Some(s);
        assert_eq!(project(&raw).unwrap().status, Some(CanonicalStatus::Pending));
    }

    #[test]
    fn author_falls_back_to_item_user_id() {
        let projected = project(&item()).unwrap();
        let author = projected.author.unwrap();
        assert_eq!(author.username, "alice");
        assert_eq!(author.id.as_deref(), Some("user-1"));
    }

    #[test]
    fn deserializes_sparse_records() {
        let raw: RawFeedItem = serde_json::from_str(
            r#"{
                "id": "abc",
                "title": null,
                "code_snippet": {"id": "s1", "status": "completed", "review_count": null}
            }"#,
        )
        .unwrap();

        let projected = project(&raw).unwrap();
        assert_eq!(projected.status, Some(CanonicalStatus::Approved));
        assert_eq!(projected.review_count, 0);
        assert!(projected.author.is_none());
    }

    #[test]
    fn projection_is_deterministic() {
        let mut raw = item();
        raw.code_snippet = Some(snippet("approved"));
        assert_eq!(project(&raw), project(&raw));
    }
}
