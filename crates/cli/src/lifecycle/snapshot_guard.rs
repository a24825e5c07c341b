use dnsrelay_application::ports::{CacheSnapshotPort, SnapshotOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// Saves the answer cache exactly once: explicitly through [`save`] on an
/// orderly shutdown, or from `Drop` on any other way out of the server
/// scope (early return, unwinding panic).
///
/// [`save`]: SnapshotGuard::save
pub struct SnapshotGuard {
    snapshot: Arc<dyn CacheSnapshotPort>,
    saved: bool,
}

impl SnapshotGuard {
    pub fn new(snapshot: Arc<dyn CacheSnapshotPort>) -> Self {
        Self {
            snapshot,
            saved: false,
        }
    }

    pub fn save(&mut self) {
        if self.saved {
            return;
        }
        self.saved = true;

        match self.snapshot.save_snapshot() {
            Ok(SnapshotOutcome::Written { cached, learned }) => {
                info!(cached, learned, "Cache snapshot saved");
            }
            Ok(SnapshotOutcome::Skipped { cached, persisted }) => {
                info!(
                    cached,
                    persisted, "Cache did not grow since the last snapshot, nothing saved"
                );
            }
            Ok(SnapshotOutcome::Blocked { cached }) => {
                warn!(cached, "Cache not saved, an unreadable snapshot is still in place");
            }
            Err(e) => warn!(error = %e, "Failed to save cache snapshot at shutdown"),
        }
    }
}

impl Drop for SnapshotGuard {
    fn drop(&mut self) {
        if !self.saved {
            warn!("Relay scope left without an orderly shutdown, saving cache snapshot");
            self.save();
        }
    }
}
