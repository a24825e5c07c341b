use dnsrelay_domain::QuestionKey;
use std::net::SocketAddr;

/// In-flight upstream lookups: which clients wait on which question.
pub trait PendingQueries: Send + Sync {
    /// Append `addr` to the waiters for `key`; duplicates are kept.
    fn push(&self, key: &QuestionKey, addr: SocketAddr);

    /// Owned copy of the waiters, in arrival order.
    fn get(&self, key: &QuestionKey) -> Option<Vec<SocketAddr>>;

    fn clear(&self, key: &QuestionKey);

    /// Number of questions currently awaiting an upstream answer.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
