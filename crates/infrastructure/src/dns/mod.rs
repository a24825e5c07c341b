pub mod cache;
pub mod pending;
pub mod server;
pub mod transport;

pub use cache::{AnswerCacheStore, SnapshotFile, SNAPSHOT_VERSION};
pub use pending::PendingQueryTable;
pub use server::{bind_udp_socket, UdpRelayServer};
pub use transport::UdpDatagramSender;
