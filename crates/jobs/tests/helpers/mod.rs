mod mock_snapshot;

pub use mock_snapshot::MockSnapshotPort;
