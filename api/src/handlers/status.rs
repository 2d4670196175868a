//! Status handlers
//!
//! Exposes the status classifier so clients can normalize legacy values the
//! same way the feed does.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{classify, CanonicalStatus};

/// Request body for POST /status/classify
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub status: CanonicalStatus,
    pub label: &'static str,
}

/// POST /status/classify
///
/// A missing or null status classifies as pending.
pub async fn classify_status(Json(body): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let status = classify(body.status.as_deref().unwrap_or_default());
    Json(ClassifyResponse {
        status,
        label: status.label(),
    })
}
