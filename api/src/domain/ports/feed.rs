//! Feed query types
//!
//! Filtering, sorting and paging options for the activity feed. The backend
//! applies them; the service only passes them through.

use serde::Deserialize;

use crate::domain::entities::{CanonicalStatus, UserId};

/// Page size used when the client doesn't ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a client can request
pub const MAX_PAGE_SIZE: u32 = 50;

/// Which records to include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFilter {
    #[default]
    All,
    Pending,
    #[serde(alias = "completed")]
    Approved,
    ChangesRequested,
    /// Only submissions authored by the viewer
    MySubmissions,
}

impl FeedFilter {
    /// Status a submission must have to match, if the filter is status-based
    pub fn status(&self) -> Option<CanonicalStatus> {
        match self {
            FeedFilter::Pending => Some(CanonicalStatus::Pending),
            FeedFilter::Approved => Some(CanonicalStatus::Approved),
            FeedFilter::ChangesRequested => Some(CanonicalStatus::ChangesRequested),
            FeedFilter::All | FeedFilter::MySubmissions => None,
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    #[default]
    Newest,
    Oldest,
    MostReviews,
    /// Pending submissions only, newest first
    NeedsReview,
}

/// A feed page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub filter: FeedFilter,
    pub sort: FeedSort,
    pub language: Option<String>,
    pub viewer: Option<UserId>,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            filter: FeedFilter::All,
            sort: FeedSort::Newest,
            language: None,
            viewer: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FeedQuery {
    /// Clamp page and page size into the supported range
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self.language = self
            .language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty() && l != "all");
        self
    }

    /// Zero-based inclusive row range for this page
    pub fn range(&self) -> (u64, u64) {
        let from = (self.page.max(1) as u64 - 1) * self.page_size as u64;
        (from, from + self.page_size.max(1) as u64 - 1)
    }

    /// Whether only records with an attached submission can match
    pub fn requires_snippet(&self) -> bool {
        self.filter != FeedFilter::All
            || self.language.is_some()
            || self.sort == FeedSort::NeedsReview
    }
}
