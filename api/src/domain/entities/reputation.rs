//! Reputation domain entity
//!
//! Scores a single review submission. The award is split into its parts so
//! profile pages can show where the points came from.

use serde::{Deserialize, Serialize};

use super::deserialize_null_default;

/// Flat award for submitting any review
pub const REVIEW_GIVEN_POINTS: i32 = 10;

/// Bonus when the review author's feedback is marked as accepted
pub const REVIEW_ACCEPTED_POINTS: i32 = 15;

/// Quality bonus for reviews under 50 words
pub const QUALITY_SHORT_POINTS: i32 = 2;

/// Quality bonus for reviews of 50 to 200 words
pub const QUALITY_MEDIUM_POINTS: i32 = 5;

/// Quality bonus for reviews over 200 words
pub const QUALITY_DETAILED_POINTS: i32 = 10;

/// Lowest word count that reaches the medium tier
pub const MEDIUM_TIER_MIN_WORDS: usize = 50;

/// Highest word count that stays in the medium tier
pub const MEDIUM_TIER_MAX_WORDS: usize = 200;

/// A review as submitted for scoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub content: String,
    #[serde(
        default,
        alias = "isAccepted",
        deserialize_with = "deserialize_null_default"
    )]
    pub is_accepted: bool,
}

impl ReviewSubmission {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_accepted: false,
        }
    }

    pub fn accepted(mut self) -> Self {
        self.is_accepted = true;
        self
    }

    /// Number of whitespace-delimited tokens in the content
    pub fn word_count(&self) -> usize {
        count_words(&self.content)
    }
}

/// Word-count band used to scale the quality bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Fewer than 50 words (including empty content)
    Short,
    /// 50 to 200 words inclusive
    Medium,
    /// More than 200 words
    Detailed,
}

impl QualityTier {
    /// Pick the tier for a word count, highest band first
    pub fn from_word_count(words: usize) -> Self {
        if words > MEDIUM_TIER_MAX_WORDS {
            QualityTier::Detailed
        } else if words >= MEDIUM_TIER_MIN_WORDS {
            QualityTier::Medium
        } else {
            QualityTier::Short
        }
    }

    pub fn bonus(&self) -> i32 {
        match self {
            QualityTier::Short => QUALITY_SHORT_POINTS,
            QualityTier::Medium => QUALITY_MEDIUM_POINTS,
            QualityTier::Detailed => QUALITY_DETAILED_POINTS,
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityTier::Short => write!(f, "short"),
            QualityTier::Medium => write!(f, "medium"),
            QualityTier::Detailed => write!(f, "detailed"),
        }
    }
}

/// Points awarded for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationAward {
    pub base_points: i32,
    pub quality_bonus: i32,
    pub accepted_bonus: i32,
    pub total: i32,
    pub quality_tier: QualityTier,
}

/// Count whitespace-delimited tokens; whitespace-only text has zero words.
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Longest run of consecutive detailed-tier reviews in `history`, which is
/// ordered oldest first
pub fn detailed_review_streak(history: &[ReviewSubmission]) -> i64 {
    let mut longest = 0;
    let mut current = 0;
    for review in history {
        if QualityTier::from_word_count(review.word_count()) == QualityTier::Detailed {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Score a review submission.
///
/// Total, never below `REVIEW_GIVEN_POINTS + QUALITY_SHORT_POINTS`.
pub fn score(submission: &ReviewSubmission) -> ReputationAward {
    let quality_tier = QualityTier::from_word_count(submission.word_count());
    let base_points = REVIEW_GIVEN_POINTS;
    let quality_bonus = quality_tier.bonus();
    let accepted_bonus = if submission.is_accepted {
        REVIEW_ACCEPTED_POINTS
    } else {
        0
    };

    ReputationAward {
        base_points,
        quality_bonus,
        accepted_bonus,
        total: base_points + quality_bonus + accepted_bonus,
        quality_tier,
    }
}
