pub mod relay;

pub use relay::{RelayDatagramUseCase, RelayOutcome};
