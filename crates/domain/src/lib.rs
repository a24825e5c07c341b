//! dnsrelay domain layer
pub mod cache_policy;
pub mod config;
pub mod errors;
pub mod question_key;

pub use cache_policy::{CachePolicy, KeyCasePolicy, RepeatAnswerPolicy, DEFAULT_MAX_ANSWER_AGE_SECS};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use question_key::QuestionKey;
