pub mod udp;

pub use udp::UdpDatagramSender;
