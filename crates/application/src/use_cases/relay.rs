mod relay_datagram;

pub use relay_datagram::{RelayDatagramUseCase, RelayOutcome};
