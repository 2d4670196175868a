//! Review status domain entity
//!
//! Submissions are stored with free-form status strings that drifted over time
//! (`completed` vs `approved`, mixed casing, spaces instead of underscores).
//! Everything outside the storage layer works with [`CanonicalStatus`] only.

use serde::{Deserialize, Serialize};

/// The fixed set of outcomes a submission can display as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    /// Waiting for a review (also the fallback for anything unrecognized)
    #[default]
    Pending,
    /// A reviewer approved the submission
    Approved,
    /// A reviewer asked for changes
    ChangesRequested,
}

/// Normalized spellings stored for an approved submission
pub const APPROVED_SPELLINGS: &[&str] = &["completed", "approved"];

/// Normalized spellings stored for a submission with requested changes
pub const CHANGES_REQUESTED_SPELLINGS: &[&str] = &["changes_requested"];

impl CanonicalStatus {
    /// Human-readable badge text
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalStatus::Pending => "Pending Review",
            CanonicalStatus::Approved => "Approved",
            CanonicalStatus::ChangesRequested => "Changes Requested",
        }
    }
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanonicalStatus::Pending => write!(f, "pending"),
            CanonicalStatus::Approved => write!(f, "approved"),
            CanonicalStatus::ChangesRequested => write!(f, "changes_requested"),
        }
    }
}

impl From<&str> for CanonicalStatus {
    fn from(raw: &str) -> Self {
        classify(raw)
    }
}

/// Normalize a raw status: trim, lower-case, and join whitespace runs with `_`.
pub fn normalize_status(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Map a raw stored status onto its canonical value.
///
/// Never fails: unknown or empty input is `Pending`, so a status written by a
/// newer client can't break a list view.
pub fn classify(raw: &str) -> CanonicalStatus {
    let normalized = normalize_status(raw);
    if APPROVED_SPELLINGS.contains(&normalized.as_str()) {
        CanonicalStatus::Approved
    } else if CHANGES_REQUESTED_SPELLINGS.contains(&normalized.as_str()) {
        CanonicalStatus::ChangesRequested
    } else {
        CanonicalStatus::Pending
    }
}
