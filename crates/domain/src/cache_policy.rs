use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Answers older than this are evicted on the next lookup (48 hours).
pub const DEFAULT_MAX_ANSWER_AGE_SECS: u64 = 172_800;

/// What `push` does when the key already has a cached answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatAnswerPolicy {
    /// Append the new records to the existing ones; the capture time stays.
    #[default]
    Accumulate,
    /// Drop the old records and re-capture the answer at the current time.
    Replace,
}

/// How the query name is folded into a [`crate::QuestionKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCasePolicy {
    /// Keys compare byte-for-byte, so `Example.com` and `example.com` differ.
    #[default]
    Preserve,
    /// ASCII-lowercase the name before building the key.
    Fold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_answer_age: Duration,
    pub repeat_answers: RepeatAnswerPolicy,
    pub key_case: KeyCasePolicy,
}

impl CachePolicy {
    pub fn is_expired(&self, age: Duration) -> bool {
        age > self.max_answer_age
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_answer_age: Duration::from_secs(DEFAULT_MAX_ANSWER_AGE_SECS),
            repeat_answers: RepeatAnswerPolicy::default(),
            key_case: KeyCasePolicy::default(),
        }
    }
}
