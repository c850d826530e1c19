//! Counting driver: synthesizes the circuit shape without witnesses.
//!
//! Used to report circuit sizes and to show that a gadget never touches its
//! witness outside of witness closures.

use core::marker::PhantomData;

use ff::Field;

use crate::driver::Driver;
use crate::error::Error;
use crate::maybe::EmptyKind;
use crate::sink::{CountingSink, Sink};

/// Wire handle under the counting driver. Carries nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountingWire;

impl CountingWire {
    pub const fn new() -> Self {
        CountingWire
    }
}

/// Size of a synthesized constraint system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CircuitStats {
    pub num_mul: usize,
    pub num_linear: usize,
    pub num_wires: usize,
}

impl CircuitStats {
    pub fn total_constraints(&self) -> usize {
        self.num_mul + self.num_linear
    }
}

/// Driver that only counts gates and wires.
#[derive(Debug, Clone)]
pub struct CountingDriver<F> {
    pub num_mul: usize,
    pub num_linear: usize,
    pub num_wires: usize,
    _field: PhantomData<F>,
}

impl<F: Field> CountingDriver<F> {
    pub fn new() -> Self {
        CountingDriver {
            num_mul: 0,
            num_linear: 0,
            // ONE
            num_wires: 1,
            _field: PhantomData,
        }
    }

    pub fn stats(&self) -> CircuitStats {
        CircuitStats {
            num_mul: self.num_mul,
            num_linear: self.num_linear,
            num_wires: self.num_wires,
        }
    }
}

impl<F: Field> Default for CountingDriver<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> Driver for CountingDriver<F> {
    type F = F;
    type W = CountingWire;
    type MaybeKind = EmptyKind;
    type IO = CountingSink;

    const ONE: Self::W = CountingWire;

    fn mul(
        &mut self,
        _values: impl FnOnce() -> Result<(F, F, F), Error>,
    ) -> Result<(Self::W, Self::W, Self::W), Error> {
        self.num_mul += 1;
        self.num_wires += 3;
        Ok((CountingWire, CountingWire, CountingWire))
    }

    fn add<L: IntoIterator<Item = (Self::W, F)>>(
        &mut self,
        _lc: impl FnOnce() -> L,
    ) -> Result<Self::W, Error> {
        self.num_linear += 1;
        self.num_wires += 1;
        Ok(CountingWire)
    }

    fn enforce_zero<L: IntoIterator<Item = (Self::W, F)>>(
        &mut self,
        _lc: impl FnOnce() -> L,
    ) -> Result<(), Error> {
        self.num_linear += 1;
        Ok(())
    }
}

impl<F: Field> Sink<CountingDriver<F>, CountingWire> for CountingSink {
    fn push(&mut self, _wire: CountingWire) -> Result<(), Error> {
        self.count += 1;
        Ok(())
    }
}
