//! Feed service
//!
//! Serves the activity feed: paged listings from the backend and a live
//! stream of new records. Every record passes through the feed projection, so
//! callers only ever see renderable items with canonical statuses.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{project, FeedDisplayItem};
use crate::domain::ports::{
    ActivityFilter, ActivityStream, ActivitySubscription, FeedFilter, FeedQuery, FeedRepository,
};
use crate::error::AppError;

/// One page of the feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub items: Vec<FeedDisplayItem>,
    pub page: u32,
    pub page_size: u32,
    /// Records matching the query on the backend, before projection
    pub total_items: i64,
    pub total_pages: i64,
}

/// Live feed updates with the projection applied per record.
///
/// Records are yielded in arrival order. Dropping this unsubscribes.
pub struct ProjectedActivity {
    subscription: ActivitySubscription,
}

impl ProjectedActivity {
    /// Next renderable item, or `None` once the stream ends
    pub async fn next(&mut self) -> Option<FeedDisplayItem> {
        loop {
            let raw = self.subscription.recv().await?;
            match project(&raw) {
                Some(item) => return Some(item),
                None => {
                    tracing::debug!(item_id = %raw.id, "Dropping unrenderable activity record");
                }
            }
        }
    }
}

/// Service for listing and following the activity feed
pub struct FeedService<FR, AS>
where
    FR: FeedRepository,
    AS: ActivityStream,
{
    feed: Arc<FR>,
    activity: Arc<AS>,
}

impl<FR, AS> FeedService<FR, AS>
where
    FR: FeedRepository,
    AS: ActivityStream,
{
    pub fn new(feed: Arc<FR>, activity: Arc<AS>) -> Self {
        Self { feed, activity }
    }

    /// Fetch and project one page of the feed
    pub async fn list(&self, query: FeedQuery) -> Result<FeedPage, AppError> {
        let mut query = query.normalized();
        if query.filter == FeedFilter::MySubmissions && query.viewer.is_none() {
            tracing::debug!("my_submissions requested without a viewer, showing all");
            query.filter = FeedFilter::All;
        }

        let (raw_items, total_items) = self.feed.list(&query).await?;
        let fetched = raw_items.len();
        let items: Vec<FeedDisplayItem> = raw_items.iter().filter_map(project).collect();

        if items.len() < fetched {
            tracing::debug!(
                dropped = fetched - items.len(),
                "Dropped unrenderable feed records"
            );
        }

        let page_size = query.page_size as i64;
        Ok(FeedPage {
            items,
            page: query.page,
            page_size: query.page_size,
            total_items,
            total_pages: (total_items + page_size - 1) / page_size,
        })
    }

    /// Subscribe to new activity matching the filter
    pub async fn follow(&self, filter: ActivityFilter) -> Result<ProjectedActivity, AppError> {
        tracing::debug!(table = %filter.table, "Subscribing to activity stream");
        let subscription = self.activity.subscribe(filter).await?;
        Ok(ProjectedActivity { subscription })
    }
}
