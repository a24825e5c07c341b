use chrono::{DateTime, Utc};
use dnsrelay_domain::{CachePolicy, QuestionKey};
use hickory_proto::rr::Record;
use std::time::Duration;

/// Everything the relay has learned about one question.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedAnswer {
    pub records: Vec<Record>,
    /// Wall-clock time of the first insertion for the key.
    pub captured_at: DateTime<Utc>,
}

impl CachedAnswer {
    pub fn new(records: Vec<Record>, captured_at: DateTime<Utc>) -> Self {
        Self {
            records,
            captured_at,
        }
    }

    /// Age relative to `now`; a capture time in the future counts as zero.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.captured_at).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn is_expired_at(&self, policy: &CachePolicy, now: DateTime<Utc>) -> bool {
        policy.is_expired(self.age_at(now))
    }
}

/// Key → answer store. Every call is atomic with respect to every other
/// call on the same store; staleness is judged by the caller.
pub trait AnswerCache: Send + Sync {
    /// Insert a new answer stamped with the current time, or merge `records`
    /// into the existing one according to the store's repeat policy.
    fn push(&self, key: &QuestionKey, records: Vec<Record>);

    /// Owned copy of the stored answer.
    fn get(&self, key: &QuestionKey) -> Option<CachedAnswer>;

    fn contains(&self, key: &QuestionKey) -> bool;

    fn clear(&self, key: &QuestionKey);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
