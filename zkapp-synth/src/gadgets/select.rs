//! Conditional selection.

use crate::driver::{Driver, WireValue};
use crate::error::Error;
use crate::gadgets::arithmetic;
use crate::gadgets::boolean::BoolWire;

/// `if condition { a } else { b }`, computed as `condition * (a - b) + b`.
pub fn select<D: Driver>(
    dr: &mut D,
    condition: &BoolWire<D>,
    a: &WireValue<D>,
    b: &WireValue<D>,
) -> Result<WireValue<D>, Error> {
    let diff = arithmetic::sub(dr, a, b)?;
    let scaled = arithmetic::mul(dr, &condition.wire, &diff)?;
    arithmetic::add(dr, &scaled, b)
}
