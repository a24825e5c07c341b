pub mod dns;
mod signals;

pub use dns::run_dns_relay;
