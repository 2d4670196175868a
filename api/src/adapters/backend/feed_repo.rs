//! Backend adapter for FeedRepository
//!
//! Feed items are read with their author and submission embedded. Filters on
//! the submission switch the embed to an inner join so rows without a
//! matching submission drop out of both the page and the count.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::BackendClient;
use super::status_filter::status_param;
use crate::domain::entities::{CanonicalStatus, RawFeedItem};
use crate::domain::ports::{FeedFilter, FeedQuery, FeedRepository, FeedSort};
use crate::error::DomainError;

const AUTHOR_EMBED: &str = "user:profiles!feed_items_user_id_fkey(id,username,avatar_url)";
const SNIPPET_COLUMNS: &str =
    "id,title,description,language,status,review_count,comment_count,external_link,user_id";

/// Select clause for feed items with author and submission embedded
pub(super) fn feed_select(inner_snippet: bool) -> String {
    let join = if inner_snippet { "!inner" } else { "" };
    format!(
        "*,{},code_snippet:code_snippets!feed_items_code_snippet_id_fkey{}({})",
        AUTHOR_EMBED, join, SNIPPET_COLUMNS
    )
}

/// Build the `feed_items` path (select, filters, ordering) for a query
fn feed_path(query: &FeedQuery) -> String {
    let mut path = format!("feed_items?select={}", feed_select(query.requires_snippet()));

    if let Some(language) = &query.language {
        path.push_str(&format!(
            "&code_snippet.language=eq.{}",
            urlencoding::encode(language)
        ));
    }

    match query.filter {
        FeedFilter::All => {}
        FeedFilter::MySubmissions => {
            if let Some(viewer) = &query.viewer {
                path.push_str(&format!("&code_snippet.user_id=eq.{}", viewer));
            }
        }
        filter => {
            if let Some(status) = filter.status() {
                path.push('&');
                path.push_str(&status_param("code_snippet", status));
            }
        }
    }

    match query.sort {
        FeedSort::Newest => path.push_str("&order=created_at.desc"),
        FeedSort::Oldest => path.push_str("&order=created_at.asc"),
        FeedSort::MostReviews => {
            path.push_str("&order=code_snippet(review_count).desc.nullslast,created_at.desc")
        }
        FeedSort::NeedsReview => {
            if query.filter != FeedFilter::Pending {
                path.push('&');
                path.push_str(&status_param("code_snippet", CanonicalStatus::Pending));
            }
            path.push_str("&order=created_at.desc");
        }
    }

    path
}

/// Activity feed read from the backend's `feed_items` table
pub struct BackendFeedRepository {
    client: Arc<BackendClient>,
}

impl BackendFeedRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedRepository for BackendFeedRepository {
    async fn list(&self, query: &FeedQuery) -> Result<(Vec<RawFeedItem>, i64), DomainError> {
        let path = feed_path(query);
        tracing::debug!(path = %path, range = ?query.range(), "Fetching feed page");

        let (items, total) = self.client.get_page(&path, query.range()).await?;
        Ok((items, total))
    }
}
