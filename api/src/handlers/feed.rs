//! Feed handlers
//!
//! Paged feed listing and a live stream of new activity over server-sent
//! events. Both only ever emit projected items.

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::FeedPage;
use crate::domain::entities::UserId;
use crate::domain::ports::{ActivityFilter, FeedFilter, FeedQuery, FeedSort, DEFAULT_PAGE_SIZE};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for GET /feed
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub filter: Option<FeedFilter>,
    #[serde(default)]
    pub sort: Option<FeedSort>,
    #[serde(default)]
    pub language: Option<String>,
    /// Needed for `filter=my_submissions`
    #[serde(default)]
    pub viewer: Option<Uuid>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl From<FeedParams> for FeedQuery {
    fn from(params: FeedParams) -> Self {
        FeedQuery {
            filter: params.filter.unwrap_or_default(),
            sort: params.sort.unwrap_or_default(),
            language: params.language,
            viewer: params.viewer.map(UserId),
            page: params.page.unwrap_or(1),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

/// GET /feed
pub async fn get_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedPage>, AppError> {
    let page = state.feed_service.list(params.into()).await?;
    Ok(Json(page))
}

/// Query parameters for GET /feed/live
#[derive(Debug, Default, Deserialize)]
pub struct LiveFeedParams {
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// GET /feed/live
///
/// Streams each new renderable item as an `activity` event, in arrival order.
/// Closing the connection ends the subscription.
pub async fn live_feed(
    State(state): State<AppState>,
    Query(params): Query<LiveFeedParams>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let filter = match params.user_id {
        Some(id) => ActivityFilter::for_user(&UserId(id)),
        None => ActivityFilter::feed(),
    };
    let activity = state.feed_service.follow(filter).await?;

    let events = stream::unfold(activity, |mut activity| async move {
        let item = activity.next().await?;
        let event = match Event::default().event("activity").json_data(&item) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(item_id = %item.id, error = %e, "Failed to encode activity event");
                Event::default().event("error").data("encoding failed")
            }
        };
        Some((Ok(event), activity))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
