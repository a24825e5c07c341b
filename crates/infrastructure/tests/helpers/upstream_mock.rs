#![allow(dead_code)]

use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Stand-in for the upstream resolver: the test decides when and what it
/// answers.
pub struct MockUpstream {
    socket: UdpSocket,
}

impl MockUpstream {
    pub async fn start() -> Self {
        Self {
            socket: UdpSocket::bind("127.0.0.1:0").await.unwrap(),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.socket.local_addr().unwrap()
    }

    /// Next forwarded query, or `None` if nothing arrives within `wait`.
    pub async fn recv_query(&self, wait: Duration) -> Option<(Message, SocketAddr)> {
        let mut buf = vec![0u8; 4096];
        let (len, from) = timeout(wait, self.socket.recv_from(&mut buf))
            .await
            .ok()?
            .unwrap();
        Some((Message::from_vec(&buf[..len]).unwrap(), from))
    }

    pub async fn reply(&self, response: &Message, relay: SocketAddr) {
        self.socket
            .send_to(&response.to_vec().unwrap(), relay)
            .await
            .unwrap();
    }
}
