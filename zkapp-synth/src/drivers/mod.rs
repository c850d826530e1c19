//! Driver implementations.

mod counting;
mod proving;

pub use counting::{CircuitStats, CountingDriver, CountingWire};
pub use proving::{ProvingDriver, ProvingWire};
