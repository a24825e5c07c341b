mod snapshot_guard;

pub use snapshot_guard::SnapshotGuard;
