use crate::cache_policy::{
    CachePolicy, KeyCasePolicy, RepeatAnswerPolicy, DEFAULT_MAX_ANSWER_AGE_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,

    #[serde(default)]
    pub repeat_answers: RepeatAnswerPolicy,

    #[serde(default)]
    pub key_case: KeyCasePolicy,

    /// Periodic checkpoint interval; 0 saves only at shutdown.
    #[serde(default)]
    pub snapshot_interval_secs: u64,
}

impl CacheConfig {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy {
            max_answer_age: Duration::from_secs(self.max_age_secs),
            repeat_answers: self.repeat_answers,
            key_case: self.key_case,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            max_age_secs: default_max_age_secs(),
            repeat_answers: RepeatAnswerPolicy::default(),
            key_case: KeyCasePolicy::default(),
            snapshot_interval_secs: 0,
        }
    }
}

fn default_snapshot_path() -> String {
    "dns.cache".to_string()
}

fn default_max_age_secs() -> u64 {
    DEFAULT_MAX_ANSWER_AGE_SECS
}
