use dnsrelay_domain::DomainError;

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// The cache has not grown past what is already on disk.
    Skipped { cached: usize, persisted: usize },
    Written { cached: usize, learned: usize },
    /// An unreadable snapshot is still on disk and could not be moved
    /// aside; it is never overwritten.
    Blocked { cached: usize },
}

/// Persistence of the answer cache across restarts.
pub trait CacheSnapshotPort: Send + Sync {
    /// Replace the in-memory contents with the snapshot on disk and return
    /// the number of loaded answers.
    fn load_snapshot(&self) -> Result<usize, DomainError>;

    /// Write the cache out unless it is no larger than the last snapshot.
    fn save_snapshot(&self) -> Result<SnapshotOutcome, DomainError>;
}
