//! Activity stream port
//!
//! Push-based delivery of new activity records. The producer owns ordering;
//! consumers get records in the order the producer sends them.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::entities::{RawFeedItem, UserId};
use crate::error::DomainError;

/// Which change feed to subscribe to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFilter {
    /// Backend table the records come from
    pub table: String,
    /// Optional `column = value` row filter
    pub eq: Option<(String, String)>,
}

impl ActivityFilter {
    /// Every new feed item
    pub fn feed() -> Self {
        Self {
            table: "feed_items".to_string(),
            eq: None,
        }
    }

    /// New feed items created by one user
    pub fn for_user(user_id: &UserId) -> Self {
        Self {
            table: "feed_items".to_string(),
            eq: Some(("user_id".to_string(), user_id.to_string())),
        }
    }
}

/// Receiving end of a subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ActivitySubscription {
    receiver: mpsc::Receiver<RawFeedItem>,
}

impl ActivitySubscription {
    pub fn new(receiver: mpsc::Receiver<RawFeedItem>) -> Self {
        Self { receiver }
    }

    /// Next record, or `None` once the producer has stopped
    pub async fn recv(&mut self) -> Option<RawFeedItem> {
        self.receiver.recv().await
    }
}

/// Source of realtime activity records
#[async_trait]
pub trait ActivityStream: Send + Sync {
    async fn subscribe(&self, filter: ActivityFilter)
        -> Result<ActivitySubscription, DomainError>;
}
