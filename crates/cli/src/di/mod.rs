mod relay;

pub use relay::RelayServices;
