//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod dashboard;
pub mod feed;
pub mod reputation;
pub mod status;

pub use dashboard::get_dashboard;
pub use feed::{get_feed, live_feed};
pub use reputation::{
    award_review, award_submission_approval, evaluate_achievements, get_reputation, score_review,
};
pub use status::classify_status;
