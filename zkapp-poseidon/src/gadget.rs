//! In-circuit sponge and hash-input packing.
//!
//! Mirrors [`crate::native`] and [`crate::input`] gate for gate: any driver
//! carrying witnesses produces exactly the native values.

use ff::Field;
use pasta_curves::Fp;
use zkapp_synth::gadgets::{add, add_constant, linear_combination, pow7};
use zkapp_synth::{Driver, Error, WireValue};

use crate::input::{check_packed_width, pow2, PACKING_LIMIT};
use crate::native::Sponge;
use crate::params::{self, is_full_round, length_domain, RATE, WIDTH};
use crate::prefix::HashPrefix;

/// In-circuit sponge state.
pub type StateVar<D> = [WireValue<D>; WIDTH];

fn round<D: Driver<F = Fp>>(
    dr: &mut D,
    state: &StateVar<D>,
    rc: &[Fp; WIDTH],
    full: bool,
) -> Result<StateVar<D>, Error> {
    let mds = params::mds();
    let mut s = [
        add_constant(dr, &state[0], rc[0])?,
        add_constant(dr, &state[1], rc[1])?,
        add_constant(dr, &state[2], rc[2])?,
    ];
    let sboxed = if full { WIDTH } else { 1 };
    for lane in s.iter_mut().take(sboxed) {
        *lane = pow7(dr, lane)?;
    }
    let mut lane = |i: usize| {
        linear_combination(
            dr,
            &[(&s[0], mds[i][0]), (&s[1], mds[i][1]), (&s[2], mds[i][2])],
            Fp::ZERO,
        )
    };
    Ok([lane(0)?, lane(1)?, lane(2)?])
}

/// Apply the Poseidon permutation.
pub fn permute<D: Driver<F = Fp>>(dr: &mut D, state: StateVar<D>) -> Result<StateVar<D>, Error> {
    params::round_constants()
        .iter()
        .enumerate()
        .try_fold(state, |state, (r, rc)| round(dr, &state, rc, is_full_round(r)))
}

/// In-circuit counterpart of [`Sponge`].
pub struct SpongeVar<D: Driver<F = Fp>> {
    state: StateVar<D>,
}

impl<D: Driver<F = Fp>> SpongeVar<D> {
    /// Lift a known native state into constant wires.
    pub fn constant(dr: &mut D, sponge: &Sponge) -> Result<Self, Error> {
        let [a, b, c] = *sponge.state();
        Ok(SpongeVar {
            state: [
                WireValue::constant(dr, a)?,
                WireValue::constant(dr, b)?,
                WireValue::constant(dr, c)?,
            ],
        })
    }

    /// Salted state for `prefix`. The salt is public, so it is computed
    /// natively and enters as constants.
    pub fn for_prefix(dr: &mut D, prefix: HashPrefix) -> Result<Self, Error> {
        Self::constant(dr, &Sponge::for_prefix(prefix))
    }

    /// In-circuit [`Sponge::tag_length`]. The length is part of the
    /// circuit shape, so it enters as a constant.
    pub fn tag_length(&mut self, dr: &mut D, len: usize) -> Result<(), Error> {
        self.state[RATE] = add_constant(dr, &self.state[RATE], length_domain(len))?;
        Ok(())
    }

    pub fn absorb(&mut self, dr: &mut D, xs: &[WireValue<D>]) -> Result<(), Error> {
        if xs.is_empty() {
            let state = self.state.clone();
            self.state = permute(dr, state)?;
            return Ok(());
        }
        for block in xs.chunks(RATE) {
            let mut state = self.state.clone();
            for (lane, x) in state.iter_mut().zip(block) {
                *lane = add(dr, lane, x)?;
            }
            self.state = permute(dr, state)?;
        }
        Ok(())
    }

    pub fn digest(&self) -> WireValue<D> {
        self.state[0].clone()
    }
}

/// In-circuit [`crate::native::hash`].
pub fn hash<D: Driver<F = Fp>>(
    dr: &mut D,
    prefix: HashPrefix,
    xs: &[WireValue<D>],
) -> Result<WireValue<D>, Error> {
    let mut sponge = SpongeVar::for_prefix(dr, prefix)?;
    sponge.tag_length(dr, xs.len())?;
    sponge.absorb(dr, xs)?;
    Ok(sponge.digest())
}

/// In-circuit [`crate::input::HashInput`].
///
/// Packed chunks are taken on trust: whoever appends `(x, n)` must already
/// have constrained `x < 2^n`.
pub struct HashInputVar<D: Driver<F = Fp>> {
    pub field_elements: Vec<WireValue<D>>,
    pub packeds: Vec<(WireValue<D>, u32)>,
}

impl<D: Driver<F = Fp>> Clone for HashInputVar<D> {
    fn clone(&self) -> Self {
        HashInputVar {
            field_elements: self.field_elements.clone(),
            packeds: self.packeds.clone(),
        }
    }
}

impl<D: Driver<F = Fp>> Default for HashInputVar<D> {
    fn default() -> Self {
        HashInputVar {
            field_elements: Vec::new(),
            packeds: Vec::new(),
        }
    }
}

impl<D: Driver<F = Fp>> HashInputVar<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(x: WireValue<D>) -> Self {
        HashInputVar {
            field_elements: vec![x],
            packeds: Vec::new(),
        }
    }

    pub fn fields(xs: &[WireValue<D>]) -> Self {
        HashInputVar {
            field_elements: xs.to_vec(),
            packeds: Vec::new(),
        }
    }

    /// # Panics
    ///
    /// If `bits` does not fit below the packing limit.
    pub fn packed(x: WireValue<D>, bits: u32) -> Self {
        check_packed_width(bits);
        HashInputVar {
            field_elements: Vec::new(),
            packeds: vec![(x, bits)],
        }
    }

    pub fn append(mut self, other: HashInputVar<D>) -> Self {
        self.field_elements.extend(other.field_elements);
        self.packeds.extend(other.packeds);
        self
    }

    pub fn pack_to_fields(&self, dr: &mut D) -> Result<Vec<WireValue<D>>, Error> {
        let mut out = self.field_elements.clone();
        let mut acc: Option<WireValue<D>> = None;
        let mut acc_bits = 0u32;
        for (x, n) in &self.packeds {
            match acc.take() {
                Some(prev) if acc_bits + n < PACKING_LIMIT => {
                    acc = Some(linear_combination(
                        dr,
                        &[(&prev, Fp::ONE), (x, pow2(acc_bits))],
                        Fp::ZERO,
                    )?);
                    acc_bits += n;
                }
                prev => {
                    out.extend(prev);
                    acc = Some(x.clone());
                    acc_bits = *n;
                }
            }
        }
        out.extend(acc);
        Ok(out)
    }
}

impl<D: Driver<F = Fp>> FromIterator<HashInputVar<D>> for HashInputVar<D> {
    fn from_iter<I: IntoIterator<Item = HashInputVar<D>>>(iter: I) -> Self {
        iter.into_iter().fold(HashInputVar::new(), HashInputVar::append)
    }
}
