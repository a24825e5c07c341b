use super::signals::spawn_shutdown_listener;
use crate::di::RelayServices;
use crate::lifecycle::SnapshotGuard;
use anyhow::Context;
use dnsrelay_application::ports::{AnswerCache, CacheSnapshotPort, PendingQueries};
use dnsrelay_domain::Config;
use dnsrelay_infrastructure::dns::{bind_udp_socket, UdpRelayServer};
use dnsrelay_jobs::CacheSnapshotJob;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run the relay until a shutdown signal arrives, then save the cache.
pub async fn run_dns_relay(config: &Config) -> anyhow::Result<()> {
    let listen = config.server.listen_address();
    let socket_addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("invalid listen address {listen}"))?;

    let socket = Arc::new(
        bind_udp_socket(socket_addr)
            .with_context(|| format!("failed to bind DNS relay socket on {socket_addr}"))?,
    );
    info!(bind_address = %socket_addr, "Listening for DNS datagrams");

    let services = RelayServices::new(config, Arc::clone(&socket));

    match services.cache.load_snapshot() {
        Ok(loaded) => info!(cached = loaded, "Answer cache ready"),
        Err(e) => warn!(error = %e, "Cache snapshot unusable, starting with an empty cache"),
    }

    let mut guard = SnapshotGuard::new(services.cache.clone());
    let shutdown = CancellationToken::new();
    spawn_shutdown_listener(shutdown.clone());

    let snapshot_job = (config.cache.snapshot_interval_secs > 0).then(|| {
        Arc::new(
            CacheSnapshotJob::new(services.cache.clone())
                .with_interval(Duration::from_secs(config.cache.snapshot_interval_secs))
                .with_cancellation(shutdown.clone()),
        )
        .start()
    });

    UdpRelayServer::new(socket, Arc::clone(&services.relay))
        .with_max_inflight(config.server.max_inflight)
        .with_shutdown_grace(Duration::from_millis(config.server.shutdown_grace_ms))
        .run(shutdown.clone())
        .await;

    shutdown.cancel();
    if let Some(job) = snapshot_job {
        if let Err(e) = job.await {
            warn!(error = %e, "Cache snapshot job ended abnormally");
        }
    }

    guard.save();
    info!(
        cached = services.cache.len(),
        pending = services.pending.len(),
        "DNS relay stopped"
    );
    Ok(())
}
