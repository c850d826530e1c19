//! Poseidon parameters over the Pallas base field.
//!
//! Width 3, rate 2, the `x^7` S-box, 8 full rounds split around 56 partial
//! rounds. Round constants and the MDS matrix are generated by
//! `poseidon-primitives` from [`ZkappPoseidonSpec`], so the native
//! permutation, the gadget and the library's own `Hash` all run on the same
//! tables.
//!
//! Each round adds the round constants, applies the S-box (every lane in a
//! full round, lane 0 in a partial round), then multiplies by the MDS matrix.

use ff::{Field, PrimeField};
use once_cell::sync::Lazy;
use pasta_curves::Fp;
use poseidon_primitives::poseidon::primitives::Spec;

/// Sponge state width.
pub const WIDTH: usize = 3;

/// Elements absorbed per permutation.
pub const RATE: usize = 2;

/// Full rounds, half before and half after the partial rounds.
pub const FULL_ROUNDS: usize = 8;

/// Partial rounds.
pub const PARTIAL_ROUNDS: usize = 56;

/// S-box exponent.
pub const ALPHA: u64 = 7;

/// Round schedule and S-box handed to `poseidon-primitives`.
#[derive(Debug)]
pub struct ZkappPoseidonSpec;

impl Spec<Fp, WIDTH, RATE> for ZkappPoseidonSpec {
    fn full_rounds() -> usize {
        FULL_ROUNDS
    }

    fn partial_rounds() -> usize {
        PARTIAL_ROUNDS
    }

    fn sbox(val: Fp) -> Fp {
        val.pow_vartime([ALPHA])
    }

    fn secure_mds() -> usize {
        0
    }
}

struct Constants {
    round_constants: Vec<[Fp; WIDTH]>,
    mds: [[Fp; WIDTH]; WIDTH],
}

static CONSTANTS: Lazy<Constants> = Lazy::new(|| {
    tracing::debug!(
        full_rounds = FULL_ROUNDS,
        partial_rounds = PARTIAL_ROUNDS,
        "generating poseidon constants"
    );
    let (round_constants, mds, _) = ZkappPoseidonSpec::constants();
    Constants {
        round_constants,
        mds,
    }
});

/// Round constants, one row per round.
pub fn round_constants() -> &'static [[Fp; WIDTH]] {
    &CONSTANTS.round_constants
}

/// The MDS matrix.
pub fn mds() -> &'static [[Fp; WIDTH]; WIDTH] {
    &CONSTANTS.mds
}

/// Whether round `r` applies the S-box to every lane.
pub fn is_full_round(r: usize) -> bool {
    let half = FULL_ROUNDS / 2;
    r < half || r >= half + PARTIAL_ROUNDS
}

/// Capacity element committing to an input of `len` field elements.
///
/// Same encoding as the `ConstantLength` domain: `len * 2^64`.
pub fn length_domain(len: usize) -> Fp {
    Fp::from_u128((len as u128) << 64)
}
