//! Polling adapter for ActivityStream
//!
//! The hosted backend's change feed is consumed by polling: each subscription
//! owns a task that asks for rows past its cursor and forwards them, oldest
//! first. The task stops as soon as the subscriber drops its receiver.
//!
//! Rows are ordered by `(created_at, id)`. The cursor keeps the newest
//! timestamp delivered plus the ids delivered at exactly that timestamp, so
//! rows sharing a timestamp across batch boundaries are neither skipped nor
//! repeated. The starting point is the newest row the backend holds when the
//! poller starts, never the local clock.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::mpsc;

use super::client::{quoted, BackendClient};
use super::feed_repo::feed_select;
use crate::domain::entities::RawFeedItem;
use crate::domain::ports::{ActivityFilter, ActivityStream, ActivitySubscription};
use crate::error::{BackendError, DomainError};

/// Buffered records per subscriber before the poller waits
const CHANNEL_CAPACITY: usize = 64;

/// Most rows fetched per poll
const POLL_BATCH: u32 = 100;

/// How far a poller has read
#[derive(Debug, Default, Clone, PartialEq)]
struct Cursor {
    at: Option<DateTime<Utc>>,
    /// Ids delivered at `at`; empty means every row at `at` counts as seen
    seen: HashSet<String>,
}

impl Cursor {
    /// Cursor positioned after `latest`, the newest existing row
    fn after(latest: Option<&RawFeedItem>) -> Self {
        Self {
            at: latest.and_then(|row| row.created_at),
            seen: HashSet::new(),
        }
    }

    fn advance(&mut self, row: &RawFeedItem) {
        let Some(created_at) = row.created_at else {
            return;
        };

        match self.at {
            Some(at) if created_at < at => {}
            Some(at) if created_at == at => {
                if !self.seen.is_empty() {
                    self.seen.insert(row.id.clone());
                }
            }
            _ => {
                self.at = Some(created_at);
                self.seen.clear();
                self.seen.insert(row.id.clone());
            }
        }
    }

    /// Query parameter selecting rows past the cursor
    fn param(&self) -> Option<String> {
        let at = self.at?;
        let timestamp = at.to_rfc3339_opts(SecondsFormat::AutoSi, true);

        if self.seen.is_empty() {
            return Some(format!("created_at=gt.{}", urlencoding::encode(&timestamp)));
        }

        let mut ids: Vec<&String> = self.seen.iter().collect();
        ids.sort();
        let ids: Vec<String> = ids.into_iter().map(|id| quoted(id)).collect();
        let expression = format!(
            "(created_at.gt.{ts},and(created_at.eq.{ts},id.not.in.({ids})))",
            ts = quoted(&timestamp),
            ids = ids.join(",")
        );
        Some(format!("or={}", urlencoding::encode(&expression)))
    }
}

fn row_filter(filter: &ActivityFilter) -> String {
    match &filter.eq {
        Some((column, value)) => format!(
            "&{}=eq.{}",
            urlencoding::encode(column),
            urlencoding::encode(value)
        ),
        None => String::new(),
    }
}

/// Path for the newest existing row, used to position a new cursor
fn latest_path(filter: &ActivityFilter) -> String {
    format!(
        "{}?select=id,created_at&created_at=not.is.null{}&order=created_at.desc,id.desc&limit=1",
        filter.table,
        row_filter(filter)
    )
}

/// Path for the next batch of rows past `cursor`
fn poll_path(filter: &ActivityFilter, cursor: &Cursor) -> String {
    let select = if filter.table == "feed_items" {
        feed_select(false)
    } else {
        "*".to_string()
    };

    let mut path = format!(
        "{}?select={}&created_at=not.is.null",
        filter.table, select
    );
    if let Some(param) = cursor.param() {
        path.push('&');
        path.push_str(&param);
    }
    path.push_str(&row_filter(filter));
    path.push_str(&format!("&order=created_at.asc,id.asc&limit={}", POLL_BATCH));
    path
}

/// Poll with `fetch` every `interval` and forward new rows to `tx` until
/// the receiving side is dropped
async fn run_poller<F, Fut>(
    filter: ActivityFilter,
    interval: Duration,
    tx: mpsc::Sender<RawFeedItem>,
    fetch: F,
) where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<RawFeedItem>, BackendError>>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut cursor: Option<Cursor> = None;
    tracing::debug!(table = %filter.table, "Activity poller started");

    'poll: loop {
        tokio::select! {
            _ = tx.closed() => break,
            _ = ticker.tick() => {}
        }

        if cursor.is_none() {
            match fetch(latest_path(&filter)).await {
                Ok(rows) => cursor = Some(Cursor::after(rows.first())),
                Err(e) => {
                    tracing::warn!(table = %filter.table, error = %e, "Activity cursor lookup failed");
                    continue;
                }
            }
        }
        let Some(current) = cursor.as_mut() else {
            continue;
        };

        let rows = match fetch(poll_path(&filter, current)).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(table = %filter.table, error = %e, "Activity poll failed");
                continue;
            }
        };

        for row in rows {
            current.advance(&row);
            if tx.send(row).await.is_err() {
                break 'poll;
            }
        }
    }

    tracing::debug!(table = %filter.table, "Activity poller stopped");
}

/// Activity stream backed by periodic queries
pub struct PollingActivityStream {
    client: Arc<BackendClient>,
    interval: Duration,
}

impl PollingActivityStream {
    pub fn new(client: Arc<BackendClient>, interval: Duration) -> Self {
        Self { client, interval }
    }
}

#[async_trait]
impl ActivityStream for PollingActivityStream {
    async fn subscribe(
        &self,
        filter: ActivityFilter,
    ) -> Result<ActivitySubscription, DomainError> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let client = self.client.clone();

        tokio::spawn(run_poller(filter, self.interval, tx, move |path: String| {
            let client = client.clone();
            async move { client.get::<Vec<RawFeedItem>>(&path).await }
        }));

        Ok(ActivitySubscription::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserId;
    use chrono::TimeZone;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap()
    }

    fn row(id: &str, created_at: DateTime<Utc>) -> RawFeedItem {
        RawFeedItem {
            id: id.to_string(),
            created_at: Some(created_at),
            ..RawFeedItem::default()
        }
    }

    /// Fetch double answering with queued responses, then empty batches
    #[derive(Default)]
    struct Script {
        responses: Mutex<VecDeque<Result<Vec<RawFeedItem>, BackendError>>>,
        paths: Mutex<Vec<String>>,
    }

    impl Script {
        fn new(responses: Vec<Result<Vec<RawFeedItem>, BackendError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                paths: Mutex::new(Vec::new()),
            })
        }

        fn paths(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    fn fetcher(
        script: Arc<Script>,
    ) -> impl Fn(String) -> std::future::Ready<Result<Vec<RawFeedItem>, BackendError>> {
        move |path| {
            script.paths.lock().unwrap().push(path);
            let next = script
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()));
            std::future::ready(next)
        }
    }

    fn decoded(path: &str) -> String {
        urlencoding::decode(path).unwrap().into_owned()
    }

    #[test]
    fn cursor_starts_after_every_row_at_the_latest_timestamp() {
        let cursor = Cursor::after(Some(&row("a", at(0))));
        assert_eq!(
            decoded(&cursor.param().unwrap()),
            "created_at=gt.2024-05-01T12:00:00Z"
        );
    }

    #[test]
    fn cursor_on_empty_table_reads_from_the_start() {
        let cursor = Cursor::after(None);
        assert!(cursor.param().is_none());

        let path = poll_path(&ActivityFilter::feed(), &cursor);
        assert!(path.contains("created_at=not.is.null&order=created_at.asc,id.asc"));
    }

    #[test]
    fn cursor_remembers_ids_sharing_a_timestamp() {
        let mut cursor = Cursor::after(None);
        cursor.advance(&row("b", at(1)));
        cursor.advance(&row("a", at(1)));

        assert_eq!(
            decoded(&cursor.param().unwrap()),
            r#"or=(created_at.gt."2024-05-01T12:00:01Z",and(created_at.eq."2024-05-01T12:00:01Z",id.not.in.("a","b")))"#
        );

        cursor.advance(&row("c", at(2)));
        assert_eq!(cursor.at, Some(at(2)));
        assert_eq!(cursor.seen.len(), 1);
        assert!(cursor.seen.contains("c"));
    }

    #[test]
    fn cursor_ignores_older_and_undated_rows() {
        let mut cursor = Cursor::after(None);
        cursor.advance(&row("b", at(5)));
        cursor.advance(&row("a", at(3)));
        cursor.advance(&RawFeedItem {
            id: "z".to_string(),
            ..RawFeedItem::default()
        });

        assert_eq!(cursor.at, Some(at(5)));
        assert_eq!(cursor.seen.len(), 1);
    }

    #[test]
    fn latest_path_orders_newest_first() {
        let path = latest_path(&ActivityFilter::feed());
        assert!(path.starts_with("feed_items?select=id,created_at&"));
        assert!(path.ends_with("&order=created_at.desc,id.desc&limit=1"));
    }

    #[test]
    fn poll_path_embeds_feed_joins() {
        let path = poll_path(&ActivityFilter::feed(), &Cursor::after(Some(&row("a", at(0)))));

        assert!(path.starts_with("feed_items?select=*,user:profiles"));
        assert!(path.contains("created_at=gt.2024-05-01T12%3A00%3A00Z"));
        assert!(path.ends_with("&order=created_at.asc,id.asc&limit=100"));
    }

    #[test]
    fn poll_path_applies_row_filter() {
        let user_id = UserId::new();
        let filter = ActivityFilter::for_user(&user_id);

        assert!(poll_path(&filter, &Cursor::default()).contains(&format!("&user_id=eq.{}&", user_id)));
        assert!(latest_path(&filter).contains(&format!("&user_id=eq.{}&", user_id)));
    }

    #[test]
    fn poll_path_other_tables_select_everything() {
        let filter = ActivityFilter {
            table: "reviews".to_string(),
            eq: None,
        };
        let path = poll_path(&filter, &Cursor::default());
        assert!(path.starts_with("reviews?select=*&"));
    }

    #[tokio::test(start_paused = true)]
    async fn poller_forwards_rows_in_order_and_advances() {
        let script = Script::new(vec![
            Ok(vec![row("a", at(0))]),
            Ok(vec![row("b", at(1)), row("c", at(1))]),
            Ok(vec![row("d", at(2))]),
        ]);
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(run_poller(
            ActivityFilter::feed(),
            Duration::from_secs(1),
            tx,
            fetcher(script.clone()),
        ));

        let mut received = Vec::new();
        for _ in 0..3 {
            received.push(rx.recv().await.unwrap().id);
        }
        assert_eq!(received, vec!["b", "c", "d"]);

        let paths = script.paths();
        assert!(paths[0].contains("order=created_at.desc,id.desc&limit=1"));
        assert!(paths[1].contains("created_at=gt.2024-05-01T12%3A00%3A00Z"));
        assert!(decoded(&paths[2]).contains(r#"id.not.in.("b","c")"#));
    }

    #[tokio::test(start_paused = true)]
    async fn poller_retries_after_backend_errors() {
        let script = Script::new(vec![
            Err(BackendError::RateLimited),
            Ok(Vec::new()),
            Err(BackendError::Unauthorized),
            Ok(vec![row("x", at(4))]),
        ]);
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(run_poller(
            ActivityFilter::feed(),
            Duration::from_secs(1),
            tx,
            fetcher(script.clone()),
        ));

        assert_eq!(rx.recv().await.unwrap().id, "x");

        let paths = script.paths();
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[0], paths[1]);
        assert_eq!(paths[2], paths[3]);
    }

    #[tokio::test(start_paused = true)]
    async fn poller_stops_when_subscriber_drops() {
        let script = Script::new(Vec::new());
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let handle = tokio::spawn(run_poller(
            ActivityFilter::feed(),
            Duration::from_secs(1),
            tx,
            fetcher(script),
        ));

        tokio::time::sleep(Duration::from_secs(3)).await;
        drop(rx);

        let finished = tokio::time::timeout(Duration::from_secs(10), handle).await;
        assert!(finished.is_ok());
    }
}
