use super::cache_policy::KeyCasePolicy;
use super::errors::DomainError;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifies "this question" for both the answer cache and the pending
/// query table: the query name without its trailing root dot, followed by
/// the numeric query type zero-padded to three digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionKey(Arc<str>);

impl QuestionKey {
    pub fn derive(name: &str, query_type: u16, case: KeyCasePolicy) -> Self {
        let name = name.strip_suffix('.').unwrap_or(name);
        let key = match case {
            KeyCasePolicy::Preserve => format!("{}{:03}", name, query_type),
            KeyCasePolicy::Fold => format!("{}{:03}", name.to_ascii_lowercase(), query_type),
        };
        Self(Arc::from(key))
    }

    /// Accepts a key that was previously produced by [`QuestionKey::derive`],
    /// e.g. one read back from a cache snapshot.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits = raw
            .len()
            .checked_sub(3)
            .and_then(|start| raw.get(start..))
            .ok_or_else(|| DomainError::InvalidQuestionKey(raw.to_string()))?;

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidQuestionKey(raw.to_string()));
        }

        Ok(Self(Arc::from(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for QuestionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_strips_root_dot_and_pads_type() {
        let key = QuestionKey::derive("example.com.", 1, KeyCasePolicy::Preserve);
        assert_eq!(key.as_str(), "example.com001");
    }

    #[test]
    fn test_derive_without_trailing_dot() {
        let key = QuestionKey::derive("example.com", 28, KeyCasePolicy::Preserve);
        assert_eq!(key.as_str(), "example.com028");
    }

    #[test]
    fn test_derive_wide_query_type() {
        let key = QuestionKey::derive("example.com.", 257, KeyCasePolicy::Preserve);
        assert_eq!(key.as_str(), "example.com257");

        let key = QuestionKey::derive("example.com.", 65280, KeyCasePolicy::Preserve);
        assert_eq!(key.as_str(), "example.com65280");
    }

    #[test]
    fn test_same_name_and_type_produce_same_key() {
        let a = QuestionKey::derive("www.rust-lang.org.", 1, KeyCasePolicy::Preserve);
        let b = QuestionKey::derive("www.rust-lang.org.", 1, KeyCasePolicy::Preserve);
        assert_eq!(a, b);
    }

    #[test]
    fn test_preserve_policy_is_case_sensitive() {
        let lower = QuestionKey::derive("example.com.", 1, KeyCasePolicy::Preserve);
        let mixed = QuestionKey::derive("ExAmPlE.com.", 1, KeyCasePolicy::Preserve);
        assert_ne!(lower, mixed);
    }

    #[test]
    fn test_fold_policy_is_case_insensitive() {
        let lower = QuestionKey::derive("example.com.", 1, KeyCasePolicy::Fold);
        let mixed = QuestionKey::derive("ExAmPlE.com.", 1, KeyCasePolicy::Fold);
        assert_eq!(lower, mixed);
        assert_eq!(mixed.as_str(), "example.com001");
    }

    #[test]
    fn test_root_name() {
        let key = QuestionKey::derive(".", 2, KeyCasePolicy::Preserve);
        assert_eq!(key.as_str(), "002");
    }

    #[test]
    fn test_parse_accepts_derived_keys() {
        let derived = QuestionKey::derive("example.com.", 15, KeyCasePolicy::Preserve);
        let parsed = QuestionKey::parse(derived.as_str()).unwrap();
        assert_eq!(parsed, derived);
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        assert!(QuestionKey::parse("").is_err());
        assert!(QuestionKey::parse("01").is_err());
        assert!(QuestionKey::parse("example.com").is_err());
        assert!(QuestionKey::parse("example.comA01").is_err());
    }
}
