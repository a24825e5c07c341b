mod answer_cache;
mod cache_snapshot;
mod datagram_sender;
mod pending_queries;

pub use answer_cache::{AnswerCache, CachedAnswer};
pub use cache_snapshot::{CacheSnapshotPort, SnapshotOutcome};
pub use datagram_sender::DatagramSender;
pub use pending_queries::PendingQueries;

// Re-export for convenience
pub use dnsrelay_domain::QuestionKey;
