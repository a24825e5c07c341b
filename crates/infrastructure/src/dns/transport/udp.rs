//! UDP transport for relayed DNS messages (RFC 1035 §4.2.1)
//!
//! Messages are written as-is, one per datagram, on the shared listening
//! socket so that replies to clients and queries to the upstream resolver
//! both originate from the relay's well-known port.

use async_trait::async_trait;
use dnsrelay_application::ports::DatagramSender;
use dnsrelay_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::trace;

pub struct UdpDatagramSender {
    socket: Arc<UdpSocket>,
}

impl UdpDatagramSender {
    pub fn new(socket: Arc<UdpSocket>) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl DatagramSender for UdpDatagramSender {
    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        let sent = self
            .socket
            .send_to(bytes, target)
            .await
            .map_err(|e| DomainError::SendFailed {
                target: target.to_string(),
                reason: e.to_string(),
            })?;

        trace!(target = %target, bytes = sent, "Datagram sent");
        Ok(())
    }
}
