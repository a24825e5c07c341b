//! dnsrelay infrastructure: stores, snapshot persistence and the UDP relay
pub mod dns;
