//! Boolean gadgets.

use ff::Field;

use crate::driver::{Driver, WireValue, Witness};
use crate::error::Error;
use crate::gadgets::arithmetic;
use crate::maybe::Maybe;

/// A wire value constrained to 0 or 1.
pub struct BoolWire<D: Driver> {
    /// The underlying wire value.
    pub wire: WireValue<D>,
}

impl<D: Driver> Clone for BoolWire<D> {
    fn clone(&self) -> Self {
        BoolWire {
            wire: self.wire.clone(),
        }
    }
}

impl<D: Driver> BoolWire<D> {
    /// Wrap a wire the caller has already constrained to be boolean.
    pub fn new_unchecked(wire: WireValue<D>) -> Self {
        BoolWire { wire }
    }

    /// Allocate a boolean and enforce `b * b = b`.
    pub fn alloc(dr: &mut D, value: Witness<D, bool>) -> Result<Self, Error> {
        let field_value = D::just(|| if *value.snag() { D::F::ONE } else { D::F::ZERO });
        let wire = WireValue::alloc(dr, field_value)?;
        let sq = arithmetic::square(dr, &wire)?;
        WireValue::enforce_equal(dr, &sq, &wire)?;
        Ok(BoolWire { wire })
    }

    /// A boolean fixed at synthesis time.
    pub fn constant(dr: &mut D, value: bool) -> Result<Self, Error> {
        let k = if value { D::F::ONE } else { D::F::ZERO };
        Ok(BoolWire {
            wire: WireValue::constant(dr, k)?,
        })
    }

    /// Get the underlying wire.
    pub fn wire(&self) -> &D::W {
        &self.wire.wire
    }

    /// Get the value as a field element.
    pub fn value(&self) -> &Witness<D, D::F> {
        &self.wire.value
    }

    /// Get the value as a `bool`.
    pub fn bool_value(&self) -> Witness<D, bool> {
        D::just(|| *self.wire.value.snag() == D::F::ONE)
    }
}
