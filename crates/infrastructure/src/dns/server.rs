use dnsrelay_application::use_cases::RelayDatagramUseCase;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

/// Largest datagram read from the socket; longer ones are truncated by the
/// kernel and then fail to decode.
pub const MAX_DATAGRAM_SIZE: usize = 4096;

const DEFAULT_MAX_INFLIGHT: usize = 1024;
const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Bind the relay's listening socket. Clients and the upstream resolver
/// both talk to this one socket.
pub fn bind_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

/// Receive loop of the relay: one tracked task per datagram, at most
/// `max_inflight` of them at a time.
pub struct UdpRelayServer {
    socket: Arc<UdpSocket>,
    use_case: Arc<RelayDatagramUseCase>,
    max_inflight: usize,
    shutdown_grace: Duration,
}

impl UdpRelayServer {
    pub fn new(socket: Arc<UdpSocket>, use_case: Arc<RelayDatagramUseCase>) -> Self {
        Self {
            socket,
            use_case,
            max_inflight: DEFAULT_MAX_INFLIGHT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    pub fn with_max_inflight(mut self, max_inflight: usize) -> Self {
        self.max_inflight = max_inflight.max(1);
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serve until `shutdown` is cancelled, then wait up to the shutdown
    /// grace period for in-flight datagram tasks.
    pub async fn run(self, shutdown: CancellationToken) {
        let permits = Arc::new(Semaphore::new(self.max_inflight));
        let tracker = TaskTracker::new();
        let mut recv_buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let mut received: u64 = 0;

        info!(
            bind_address = ?self.socket.local_addr().ok(),
            upstream = %self.use_case.upstream(),
            max_inflight = self.max_inflight,
            "UDP relay ready"
        );

        loop {
            let permit = tokio::select! {
                _ = shutdown.cancelled() => break,
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let (len, from) = tokio::select! {
                _ = shutdown.cancelled() => break,
                result = self.socket.recv_from(&mut recv_buf) => match result {
                    Ok(received) => received,
                    Err(e) => {
                        error!(error = %e, "UDP recv error");
                        continue;
                    }
                },
            };

            received += 1;
            let datagram = recv_buf[..len].to_vec();
            let use_case = Arc::clone(&self.use_case);
            tracker.spawn(async move {
                let outcome = use_case.execute(&datagram, from).await;
                debug!(client = %from, outcome = ?outcome, "Datagram handled");
                drop(permit);
            });
        }

        tracker.close();
        info!(
            received,
            in_flight = tracker.len(),
            "UDP relay stopped accepting datagrams"
        );

        if tokio::time::timeout(self.shutdown_grace, tracker.wait())
            .await
            .is_err()
        {
            warn!(
                abandoned = tracker.len(),
                grace_ms = self.shutdown_grace.as_millis() as u64,
                "Shutdown grace elapsed with datagram tasks still running"
            );
        }
    }
}
