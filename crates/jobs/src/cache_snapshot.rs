use dnsrelay_application::ports::{CacheSnapshotPort, SnapshotOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 300;

/// Periodically writes the answer cache to its snapshot file so a crash
/// loses at most one interval of learned answers. The port's non-shrink
/// rule decides whether a tick actually touches the disk.
pub struct CacheSnapshotJob {
    snapshot: Arc<dyn CacheSnapshotPort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl CacheSnapshotJob {
    pub fn new(snapshot: Arc<dyn CacheSnapshotPort>) -> Self {
        Self {
            snapshot,
            interval: Duration::from_secs(DEFAULT_SNAPSHOT_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting cache snapshot job"
        );

        tokio::spawn(async move {
            // First tick one full interval out: the cache was just loaded.
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheSnapshotJob: shutting down");
                        break;
                    }
                    _ = ticker.tick() => self.run_once().await,
                }
            }
        })
    }

    async fn run_once(&self) {
        let snapshot = Arc::clone(&self.snapshot);
        match tokio::task::spawn_blocking(move || snapshot.save_snapshot()).await {
            Ok(Ok(SnapshotOutcome::Written { cached, learned })) => {
                info!(cached, learned, "Periodic cache snapshot written");
            }
            Ok(Ok(SnapshotOutcome::Skipped { cached, persisted })) => {
                debug!(cached, persisted, "Periodic cache snapshot skipped");
            }
            Ok(Ok(SnapshotOutcome::Blocked { cached })) => {
                debug!(cached, "Periodic cache snapshot blocked by an unreadable snapshot");
            }
            Ok(Err(e)) => {
                error!(error = %e, "Periodic cache snapshot failed");
            }
            Err(e) => {
                error!(error = %e, "Cache snapshot task panicked");
            }
        }
    }
}
