//! Arithmetic gadgets.

use ff::Field;

use crate::driver::{Driver, WireValue};
use crate::error::Error;
use crate::maybe::Maybe;

/// Multiply two wire values.
///
/// The driver's gate returns fresh wires, so both inputs are tied back to
/// `a` and `b` before the product is handed out.
pub fn mul<D: Driver>(
    dr: &mut D,
    a: &WireValue<D>,
    b: &WireValue<D>,
) -> Result<WireValue<D>, Error> {
    let (x, y, z) = dr.mul(|| {
        let a_val = *a.value.snag();
        let b_val = *b.value.snag();
        Ok((a_val, b_val, a_val * b_val))
    })?;
    dr.enforce_equal(&x, &a.wire)?;
    dr.enforce_equal(&y, &b.wire)?;

    let value = D::just(|| *a.value.snag() * *b.value.snag());
    Ok(WireValue::new(z, value))
}

/// `a * a`
pub fn square<D: Driver>(dr: &mut D, a: &WireValue<D>) -> Result<WireValue<D>, Error> {
    mul(dr, a, a)
}

/// `a^7`, the Poseidon S-box, in four multiplications.
pub fn pow7<D: Driver>(dr: &mut D, a: &WireValue<D>) -> Result<WireValue<D>, Error> {
    let a2 = square(dr, a)?;
    let a4 = square(dr, &a2)?;
    let a6 = mul(dr, &a4, &a2)?;
    mul(dr, &a6, a)
}

/// Add two wire values.
pub fn add<D: Driver>(
    dr: &mut D,
    a: &WireValue<D>,
    b: &WireValue<D>,
) -> Result<WireValue<D>, Error> {
    let wire = dr.add(|| [(a.wire.clone(), D::F::ONE), (b.wire.clone(), D::F::ONE)])?;
    let value = D::just(|| *a.value.snag() + *b.value.snag());
    Ok(WireValue::new(wire, value))
}

/// Subtract two wire values (`a - b`).
pub fn sub<D: Driver>(
    dr: &mut D,
    a: &WireValue<D>,
    b: &WireValue<D>,
) -> Result<WireValue<D>, Error> {
    let wire = dr.add(|| [(a.wire.clone(), D::F::ONE), (b.wire.clone(), -D::F::ONE)])?;
    let value = D::just(|| *a.value.snag() - *b.value.snag());
    Ok(WireValue::new(wire, value))
}

/// Add a constant to a wire value.
pub fn add_constant<D: Driver>(
    dr: &mut D,
    a: &WireValue<D>,
    k: D::F,
) -> Result<WireValue<D>, Error> {
    let wire = dr.add(|| [(a.wire.clone(), D::F::ONE), (D::ONE, k)])?;
    let value = D::just(|| *a.value.snag() + k);
    Ok(WireValue::new(wire, value))
}

/// `Σ coeff · term + constant` as a single virtual wire.
pub fn linear_combination<D: Driver>(
    dr: &mut D,
    terms: &[(&WireValue<D>, D::F)],
    constant: D::F,
) -> Result<WireValue<D>, Error> {
    let wire = dr.add(|| {
        terms
            .iter()
            .map(|(t, k)| (t.wire.clone(), *k))
            .chain(core::iter::once((D::ONE, constant)))
            .collect::<Vec<_>>()
    })?;
    let value = D::just(|| {
        terms
            .iter()
            .fold(constant, |acc, (t, k)| acc + *t.value.snag() * k)
    });
    Ok(WireValue::new(wire, value))
}
