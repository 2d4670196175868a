//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::mpsc;

use crate::domain::entities::{
    AchievementRule, CanonicalStatus, RawFeedItem, ReputationAward, ReviewSubmission,
    SubmissionApprovalAward, SubmissionRecord, UserId, UserProfile,
};
use crate::domain::ports::{
    ActivityFilter, ActivityStream, ActivitySubscription, FeedQuery, FeedRepository,
    ProfileRepository, ReputationLedger, ReviewRepository, SubmissionRepository,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Review Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReviewRepository {
    reviews: Arc<RwLock<HashMap<UserId, Vec<ReviewSubmission>>>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a review given by `user_id`
    pub fn with_review(self, user_id: UserId, review: ReviewSubmission) -> Self {
        self.reviews
            .write()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(review);
        self
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn fetch_reviews_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReviewSubmission>, DomainError> {
        let reviews = self.reviews.read().unwrap();
        Ok(reviews.get(user_id).cloned().unwrap_or_default())
    }

    async fn count_by_reviewer(&self, user_id: &UserId) -> Result<i64, DomainError> {
        let reviews = self.reviews.read().unwrap();
        Ok(reviews.get(user_id).map(|r| r.len() as i64).unwrap_or(0))
    }
}

// ============================================================================
// In-Memory Profile Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.profiles.write().unwrap().insert(profile.id, profile);
        self
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let profiles = self.profiles.read().unwrap();
        Ok(profiles.get(id).cloned())
    }
}

// ============================================================================
// In-Memory Reputation Ledger
// ============================================================================

/// Keeps each write's record and its points together, the way the backend
/// procedures do
#[derive(Default)]
pub struct InMemoryReputationLedger {
    awards: Arc<RwLock<HashMap<UserId, Vec<ReputationAward>>>>,
    unlocks: Arc<RwLock<HashMap<UserId, Vec<String>>>>,
    points: Arc<RwLock<HashMap<UserId, i32>>>,
    credited_submissions: Arc<RwLock<HashSet<String>>>,
    fail_writes: AtomicBool,
}

impl InMemoryReputationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail with a database error
    pub fn failing(self) -> Self {
        self.set_failing(true);
        self
    }

    /// Toggle write failures on an existing ledger
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Pre-populate with an achievement the user already holds
    pub fn with_unlocked(self, user_id: UserId, achievement_id: &str) -> Self {
        self.unlocks
            .write()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(achievement_id.to_string());
        self
    }

    /// Awards recorded for a user, in write order
    pub fn awards_for(&self, user_id: &UserId) -> Vec<ReputationAward> {
        let awards = self.awards.read().unwrap();
        awards.get(user_id).cloned().unwrap_or_default()
    }

    /// Achievement ids recorded for a user, in write order
    pub fn unlocks_for(&self, user_id: &UserId) -> Vec<String> {
        let unlocks = self.unlocks.read().unwrap();
        unlocks.get(user_id).cloned().unwrap_or_default()
    }

    /// Points credited to a user by every successful write
    pub fn points_for(&self, user_id: &UserId) -> i32 {
        let points = self.points.read().unwrap();
        points.get(user_id).copied().unwrap_or(0)
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(DomainError::Database("ledger unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn credit(&self, user_id: &UserId, points: i32) {
        *self.points.write().unwrap().entry(*user_id).or_default() += points;
    }
}

#[async_trait]
impl ReputationLedger for InMemoryReputationLedger {
    async fn persist_award(
        &self,
        user_id: &UserId,
        award: &ReputationAward,
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        self.awards
            .write()
            .unwrap()
            .entry(*user_id)
            .or_default()
            .push(*award);
        self.credit(user_id, award.total);
        Ok(())
    }

    async fn persist_unlock(
        &self,
        user_id: &UserId,
        rule: &AchievementRule,
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut unlocks = self.unlocks.write().unwrap();
        let held = unlocks.entry(*user_id).or_default();
        if held.contains(&rule.id) {
            return Err(DomainError::Validation(format!(
                "Achievement already unlocked: {}",
                rule.id
            )));
        }
        held.push(rule.id.clone());
        self.credit(user_id, rule.points_value);
        Ok(())
    }

    async fn persist_submission_approval(
        &self,
        award: &SubmissionApprovalAward,
    ) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut credited = self.credited_submissions.write().unwrap();
        if !credited.insert(award.submission_id.clone()) {
            return Ok(false);
        }
        self.credit(&award.user_id, award.points);
        Ok(true)
    }

    async fn find_unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<String>, DomainError> {
        let unlocks = self.unlocks.read().unwrap();
        Ok(unlocks
            .get(user_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// In-Memory Submission Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: Arc<RwLock<Vec<SubmissionRecord>>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submission(self, submission: SubmissionRecord) -> Self {
        self.submissions.write().unwrap().push(submission);
        self
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<SubmissionRecord>, DomainError> {
        let submissions = self.submissions.read().unwrap();
        Ok(submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<SubmissionRecord>, DomainError> {
        let submissions = self.submissions.read().unwrap();
        Ok(submissions
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn count_pending(&self) -> Result<i64, DomainError> {
        let submissions = self.submissions.read().unwrap();
        Ok(submissions
            .iter()
            .filter(|s| s.status() == CanonicalStatus::Pending)
            .count() as i64)
    }
}

// ============================================================================
// In-Memory Feed Repository
// ============================================================================

/// Serves stored items in insertion order. Filtering and sorting are left to
/// the real backend; only paging is applied here.
#[derive(Default)]
pub struct InMemoryFeedRepository {
    items: Arc<RwLock<Vec<RawFeedItem>>>,
    last_query: Arc<RwLock<Option<FeedQuery>>>,
}

impl InMemoryFeedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, item: RawFeedItem) -> Self {
        self.items.write().unwrap().push(item);
        self
    }

    /// The query most recently passed to `list`
    pub fn last_query(&self) -> Option<FeedQuery> {
        self.last_query.read().unwrap().clone()
    }
}

#[async_trait]
impl FeedRepository for InMemoryFeedRepository {
    async fn list(&self, query: &FeedQuery) -> Result<(Vec<RawFeedItem>, i64), DomainError> {
        *self.last_query.write().unwrap() = Some(query.clone());

        let items = self.items.read().unwrap();
        let (from, to) = query.range();
        let page = items
            .iter()
            .skip(from as usize)
            .take((to - from + 1) as usize)
            .cloned()
            .collect();
        Ok((page, items.len() as i64))
    }
}

// ============================================================================
// In-Memory Activity Stream
// ============================================================================

/// Fans published records out to every open subscription
#[derive(Default)]
pub struct InMemoryActivityStream {
    senders: Mutex<Vec<mpsc::Sender<RawFeedItem>>>,
    filters: Mutex<Vec<ActivityFilter>>,
}

impl InMemoryActivityStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a record to every subscriber
    pub async fn publish(&self, item: RawFeedItem) {
        let senders = self.senders.lock().unwrap().clone();
        for sender in senders {
            let _ = sender.send(item.clone()).await;
        }
    }

    /// End every subscription once buffered records are drained
    pub fn close(&self) {
        self.senders.lock().unwrap().clear();
    }

    /// Filters passed to `subscribe`, in call order
    pub fn filters(&self) -> Vec<ActivityFilter> {
        self.filters.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivityStream for InMemoryActivityStream {
    async fn subscribe(
        &self,
        filter: ActivityFilter,
    ) -> Result<ActivitySubscription, DomainError> {
        let (tx, rx) = mpsc::channel(16);
        self.filters.lock().unwrap().push(filter);
        self.senders.lock().unwrap().push(tx);
        Ok(ActivitySubscription::new(rx))
    }
}
