mod record_summary;
mod snapshot;
mod store;

pub use record_summary::{describe_record, summarize_records};
pub use snapshot::{SnapshotFile, SNAPSHOT_VERSION};
pub use store::AnswerCacheStore;
