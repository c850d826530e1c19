//! Circuit synthesis drivers.
//!
//! A `Driver` decides what synthesizing a gadget means: recording and
//! checking constraints over concrete witness values, or merely counting the
//! shape of the system. Gadgets are generic over the driver, so the same
//! code describes the constrained computation in every context.
//!
//! # Wire Types
//!
//! `D::W` is an opaque wire handle. All a gadget can do with it is clone it
//! and feed it back into the driver.
//!
//! # Example
//!
//! ```rust,ignore
//! fn square_plus_one<D: Driver>(dr: &mut D, x: &WireValue<D>) -> Result<WireValue<D>, Error> {
//!     let sq = gadgets::mul(dr, x, x)?;
//!     gadgets::add_constant(dr, &sq, D::F::ONE)
//! }
//! ```

use ff::Field;

use crate::error::Error;
use crate::maybe::{Maybe, MaybeKind};
use crate::sink::Sink;

/// Witness type of a driver: `Always<T>` when it carries values, `Empty<T>` otherwise.
pub type Witness<D, T> = <<D as Driver>::MaybeKind as MaybeKind>::Rebind<T>;

/// A circuit synthesis driver.
pub trait Driver: Sized {
    /// The field over which this driver operates.
    type F: Field;

    /// The abstract wire type.
    type W: Clone;

    /// The constant ONE wire.
    const ONE: Self::W;

    /// Whether witness values are present under this driver.
    type MaybeKind: MaybeKind;

    /// The sink receiving public inputs.
    type IO: Sink<Self, Self::W>;

    // === Constraint methods ===

    /// Create a multiplication gate `a * b = c`.
    ///
    /// The closure yields the three values; it only runs when the driver
    /// carries witnesses. Returns three fresh wires. Callers that want the
    /// gate to act on existing wires must tie the inputs with
    /// [`Driver::enforce_equal`].
    fn mul(
        &mut self,
        values: impl FnOnce() -> Result<(Self::F, Self::F, Self::F), Error>,
    ) -> Result<(Self::W, Self::W, Self::W), Error>;

    /// Create a virtual wire equal to the linear combination `Σ coeff · wire`.
    fn add<L: IntoIterator<Item = (Self::W, Self::F)>>(
        &mut self,
        lc: impl FnOnce() -> L,
    ) -> Result<Self::W, Error>;

    /// Enforce `Σ coeff · wire = 0`.
    fn enforce_zero<L: IntoIterator<Item = (Self::W, Self::F)>>(
        &mut self,
        lc: impl FnOnce() -> L,
    ) -> Result<(), Error>;

    // === Convenience methods ===

    /// Build a witness container with this driver's kind.
    #[inline(always)]
    fn just<R>(f: impl FnOnce() -> R) -> Witness<Self, R> {
        Self::MaybeKind::just(f)
    }

    /// Fallible variant of [`Driver::just`].
    #[inline(always)]
    fn with<R>(f: impl FnOnce() -> Result<R, Error>) -> Result<Witness<Self, R>, Error> {
        Self::MaybeKind::with(f)
    }

    /// Whether this driver expects witness values.
    #[inline(always)]
    fn has_witness() -> bool {
        Self::MaybeKind::HAS_VALUE
    }

    /// Allocate a fresh wire holding `value` (a `1 · v = v` gate).
    fn alloc(&mut self, value: impl FnOnce() -> Result<Self::F, Error>) -> Result<Self::W, Error> {
        let (_, _, w) = self.mul(|| {
            let v = value()?;
            Ok((Self::F::ONE, v, v))
        })?;
        Ok(w)
    }

    /// A wire fixed to a constant.
    fn constant(&mut self, value: Self::F) -> Result<Self::W, Error> {
        self.add(|| [(Self::ONE, value)])
    }

    /// Enforce `a = b`.
    fn enforce_equal(&mut self, a: &Self::W, b: &Self::W) -> Result<(), Error> {
        self.enforce_zero(|| [(a.clone(), Self::F::ONE), (b.clone(), -Self::F::ONE)])
    }
}

/// A wire together with its witness value (if the driver carries one).
pub struct WireValue<D: Driver> {
    /// The abstract wire handle.
    pub wire: D::W,
    /// The witness value.
    pub value: Witness<D, D::F>,
}

impl<D: Driver> Clone for WireValue<D> {
    fn clone(&self) -> Self {
        WireValue {
            wire: self.wire.clone(),
            value: D::MaybeKind::clone_rebind(&self.value),
        }
    }
}

impl<D: Driver> WireValue<D> {
    /// Pair a wire with its value.
    pub fn new(wire: D::W, value: Witness<D, D::F>) -> Self {
        WireValue { wire, value }
    }

    /// Allocate a fresh wire from a witness value.
    pub fn alloc(dr: &mut D, value: Witness<D, D::F>) -> Result<Self, Error> {
        let wire = dr.alloc(|| Ok(*value.snag()))?;
        Ok(WireValue { wire, value })
    }

    /// A constant wire with a known value under every driver kind.
    pub fn constant(dr: &mut D, value: D::F) -> Result<Self, Error> {
        let wire = dr.constant(value)?;
        Ok(WireValue {
            wire,
            value: D::just(|| value),
        })
    }

    /// Get a reference to the wire.
    pub fn wire(&self) -> &D::W {
        &self.wire
    }

    /// Get a reference to the value.
    pub fn value(&self) -> &Witness<D, D::F> {
        &self.value
    }

    /// Enforce that two wire values are equal.
    pub fn enforce_equal(dr: &mut D, a: &Self, b: &Self) -> Result<(), Error> {
        dr.enforce_equal(&a.wire, &b.wire)
    }
}

/// Extension trait for vectors of wire values.
pub trait WireValueVec<D: Driver> {
    /// Collect the wire handles.
    fn wires(&self) -> Vec<D::W>;
}

impl<D: Driver> WireValueVec<D> for [WireValue<D>] {
    fn wires(&self) -> Vec<D::W> {
        self.iter().map(|wv| wv.wire.clone()).collect()
    }
}
