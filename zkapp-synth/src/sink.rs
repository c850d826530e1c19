//! IO sinks for circuit public inputs.
//!
//! A circuit publishes its public inputs by pushing wires into the driver's
//! sink. The proving driver collects their values; the counting driver only
//! counts them.

use crate::driver::Driver;
use crate::error::Error;

/// A sink for circuit public inputs.
pub trait Sink<D: Driver, W> {
    /// Push a wire as the next public input.
    fn push(&mut self, wire: W) -> Result<(), Error>;

    /// Push several wires in order.
    fn push_many<I: IntoIterator<Item = W>>(&mut self, wires: I) -> Result<(), Error> {
        for wire in wires {
            self.push(wire)?;
        }
        Ok(())
    }
}

/// Collects public input values during proving.
#[derive(Debug, Clone)]
pub struct CollectingSink<F> {
    /// The collected public input values.
    pub inputs: Vec<F>,
}

impl<F> CollectingSink<F> {
    /// Create a new empty collecting sink.
    pub fn new() -> Self {
        CollectingSink { inputs: Vec::new() }
    }

    /// Get the collected inputs.
    pub fn into_inputs(self) -> Vec<F> {
        self.inputs
    }
}

impl<F> Default for CollectingSink<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts public inputs without storing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingSink {
    /// The number of public inputs pushed.
    pub count: usize,
}

impl CountingSink {
    /// Create a new counting sink.
    pub const fn new() -> Self {
        CountingSink { count: 0 }
    }

    /// Get the count.
    pub const fn count(&self) -> usize {
        self.count
    }
}
