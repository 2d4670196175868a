//! Status filters for backend queries
//!
//! Stored statuses are free-form, so equality filters miss rows the
//! classifier would accept (`Changes Requested`, ` APPROVED `, legacy
//! `reviewed`). These filters are case-insensitive POSIX patterns built from
//! the classifier's own spellings, so the backend selects exactly the rows
//! that classify as the requested status.

use super::client::quoted;
use crate::domain::entities::{
    CanonicalStatus, APPROVED_SPELLINGS, CHANGES_REQUESTED_SPELLINGS,
};

/// A normalized `_` stands for one underscore or any whitespace run
const SEPARATOR: &str = r"(\s+|_)";

fn spelling_pattern(spelling: &str) -> String {
    spelling.split('_').collect::<Vec<_>>().join(SEPARATOR)
}

/// Anchored pattern matching any raw status that normalizes to one of `spellings`
pub(super) fn status_pattern(spellings: &[&str]) -> String {
    let alternatives: Vec<String> = spellings.iter().map(|s| spelling_pattern(s)).collect();
    format!(r"^\s*({})\s*$", alternatives.join("|"))
}

/// Query parameter keeping rows whose `status` classifies as `status`.
///
/// `embed` names an embedded resource to filter on, or is empty for the
/// queried table itself. Pending is everything the other statuses don't
/// claim, null included.
pub(super) fn status_param(embed: &str, status: CanonicalStatus) -> String {
    let prefix = if embed.is_empty() {
        String::new()
    } else {
        format!("{}.", embed)
    };

    match status {
        CanonicalStatus::Approved => format!(
            "{}status=imatch.{}",
            prefix,
            urlencoding::encode(&status_pattern(APPROVED_SPELLINGS))
        ),
        CanonicalStatus::ChangesRequested => format!(
            "{}status=imatch.{}",
            prefix,
            urlencoding::encode(&status_pattern(CHANGES_REQUESTED_SPELLINGS))
        ),
        CanonicalStatus::Pending => {
            let claimed: Vec<&str> = APPROVED_SPELLINGS
                .iter()
                .chain(CHANGES_REQUESTED_SPELLINGS)
                .copied()
                .collect();
            let expression = format!(
                "(status.is.null,status.not.imatch.{})",
                quoted(&status_pattern(&claimed))
            );
            format!("{}or={}", prefix, urlencoding::encode(&expression))
        }
    }
}
