#![allow(dead_code)]
mod records;
mod upstream_mock;

pub use records::*;
pub use upstream_mock::MockUpstream;
