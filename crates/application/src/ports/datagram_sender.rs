use async_trait::async_trait;
use dnsrelay_domain::DomainError;
use std::net::SocketAddr;

/// Writes one datagram. No retry; failures are reported to the caller.
#[async_trait]
pub trait DatagramSender: Send + Sync {
    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<(), DomainError>;
}
