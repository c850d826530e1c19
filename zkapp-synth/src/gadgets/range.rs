//! Bit decomposition and range checks.

use ff::{Field, PrimeField};

use crate::driver::{Driver, WireValue};
use crate::error::Error;
use crate::gadgets::boolean::BoolWire;
use crate::maybe::Maybe;

fn bit_of<F: PrimeField>(value: &F, i: usize) -> bool {
    let repr = value.to_repr();
    let bytes = repr.as_ref();
    bytes
        .get(i / 8)
        .map(|byte| (byte >> (i % 8)) & 1 == 1)
        .unwrap_or(false)
}

/// Decompose `a` into `num_bits` little-endian boolean wires.
///
/// The bits are constrained to recompose to `a`, so this also proves
/// `a < 2^num_bits`. `num_bits` must stay below the field size or the sum
/// could wrap.
pub fn to_bits<D: Driver>(
    dr: &mut D,
    a: &WireValue<D>,
    num_bits: usize,
) -> Result<Vec<BoolWire<D>>, Error>
where
    D::F: PrimeField,
{
    if num_bits >= D::F::NUM_BITS as usize {
        return Err(Error::InvalidConfiguration(
            "to_bits: bit width must be below the field size",
        ));
    }

    let mut bits = Vec::with_capacity(num_bits);
    for i in 0..num_bits {
        let bit = BoolWire::alloc(dr, D::just(|| bit_of(a.value.snag(), i)))?;
        bits.push(bit);
    }

    let recomposed = from_bits(dr, &bits)?;
    WireValue::enforce_equal(dr, &recomposed, a)?;
    Ok(bits)
}

/// Recompose little-endian bits into a single wire.
pub fn from_bits<D: Driver>(dr: &mut D, bits: &[BoolWire<D>]) -> Result<WireValue<D>, Error> {
    let mut terms = Vec::with_capacity(bits.len());
    let mut power = D::F::ONE;
    for bit in bits {
        terms.push((bit.wire.wire.clone(), power));
        power = power.double();
    }
    let wire = dr.add(|| terms)?;

    let value = D::just(|| {
        bits.iter().rev().fold(D::F::ZERO, |acc, bit| {
            acc.double() + *bit.wire.value.snag()
        })
    });
    Ok(WireValue::new(wire, value))
}

/// Prove `a < 2^num_bits`.
pub fn range_check<D: Driver>(dr: &mut D, a: &WireValue<D>, num_bits: usize) -> Result<(), Error>
where
    D::F: PrimeField,
{
    to_bits(dr, a, num_bits).map(|_| ())
}
