use dnsrelay_application::use_cases::RelayDatagramUseCase;
use dnsrelay_domain::Config;
use dnsrelay_infrastructure::dns::{
    AnswerCacheStore, PendingQueryTable, SnapshotFile, UdpDatagramSender,
};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::info;

pub struct RelayServices {
    pub cache: Arc<AnswerCacheStore>,
    pub pending: Arc<PendingQueryTable>,
    pub relay: Arc<RelayDatagramUseCase>,
}

impl RelayServices {
    /// Wire the relay around an already bound socket; the same socket
    /// carries client traffic and upstream traffic.
    pub fn new(config: &Config, socket: Arc<UdpSocket>) -> Self {
        let policy = config.cache.policy();
        info!(
            upstream = %config.upstream.resolver,
            snapshot = %config.cache.snapshot_path,
            max_age_secs = config.cache.max_age_secs,
            repeat_answers = ?policy.repeat_answers,
            key_case = ?policy.key_case,
            "Initializing relay services"
        );

        let cache = Arc::new(
            AnswerCacheStore::new(policy.repeat_answers)
                .with_snapshot(SnapshotFile::new(&config.cache.snapshot_path)),
        );
        let pending = Arc::new(PendingQueryTable::new());
        let sender = Arc::new(UdpDatagramSender::new(socket));

        let relay = Arc::new(
            RelayDatagramUseCase::new(
                cache.clone(),
                pending.clone(),
                sender,
                config.upstream.resolver,
            )
            .with_policy(policy),
        );

        Self {
            cache,
            pending,
            relay,
        }
    }
}
