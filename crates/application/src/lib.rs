//! dnsrelay application layer: ports and the relay use case
pub mod ports;
pub mod use_cases;
