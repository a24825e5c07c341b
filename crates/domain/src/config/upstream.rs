use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Every cache miss is forwarded here.
    #[serde(default = "default_resolver")]
    pub resolver: SocketAddr,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolver: default_resolver(),
        }
    }
}

fn default_resolver() -> SocketAddr {
    SocketAddr::from(([8, 8, 4, 4], 53))
}
