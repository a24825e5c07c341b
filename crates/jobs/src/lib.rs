pub mod cache_snapshot;

pub use cache_snapshot::CacheSnapshotJob;
