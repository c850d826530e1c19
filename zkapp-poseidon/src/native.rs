//! Native (out-of-circuit) sponge.

use ff::Field;
use pasta_curves::Fp;
use poseidon_primitives::poseidon::primitives::Spec;

use crate::params::{self, is_full_round, length_domain, ZkappPoseidonSpec, RATE, WIDTH};
use crate::prefix::{HashPrefix, Salt};

/// Sponge state.
pub type State = [Fp; WIDTH];

/// Apply the Poseidon permutation in place.
pub fn permute(state: &mut State) {
    let mds = params::mds();
    for (r, rc) in params::round_constants().iter().enumerate() {
        for (lane, k) in state.iter_mut().zip(rc) {
            *lane += k;
        }
        if is_full_round(r) {
            for lane in state.iter_mut() {
                *lane = ZkappPoseidonSpec::sbox(*lane);
            }
        } else {
            state[0] = ZkappPoseidonSpec::sbox(state[0]);
        }
        let s = *state;
        for (i, lane) in state.iter_mut().enumerate() {
            *lane = mds[i][0] * s[0] + mds[i][1] * s[1] + mds[i][2] * s[2];
        }
    }
}

/// A width-3, rate-2 sponge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sponge {
    state: State,
}

impl Default for Sponge {
    fn default() -> Self {
        Sponge {
            state: [Fp::ZERO; WIDTH],
        }
    }
}

impl Sponge {
    /// Sponge with an all-zero state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sponge salted with a single domain element.
    pub fn salted(domain: Fp) -> Self {
        let mut sponge = Self::new();
        sponge.absorb(&[domain]);
        sponge
    }

    /// Sponge salted with a hash prefix.
    pub fn for_prefix(prefix: HashPrefix) -> Self {
        Self::salted(prefix.to_field())
    }

    /// Sponge salted with a salt phrase.
    pub fn for_salt(salt: Salt) -> Self {
        Self::salted(salt.to_field())
    }

    /// Rebuild a sponge from a raw state.
    pub fn from_state(state: State) -> Self {
        Sponge { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Commit to the number of elements about to be absorbed by adding
    /// [`length_domain`] to the capacity lane.
    pub fn tag_length(&mut self, len: usize) {
        self.state[RATE] += length_domain(len);
    }

    /// Absorb `xs` in blocks of `RATE`, permuting after each block.
    /// An empty input still permutes once.
    pub fn absorb(&mut self, xs: &[Fp]) {
        if xs.is_empty() {
            permute(&mut self.state);
            return;
        }
        for block in xs.chunks(RATE) {
            for (lane, x) in self.state.iter_mut().zip(block) {
                *lane += x;
            }
            permute(&mut self.state);
        }
    }

    /// The first lane of the state.
    pub fn digest(&self) -> Fp {
        self.state[0]
    }
}

/// `digest(absorb(tag_length(salt(prefix), |xs|), xs))`
///
/// Inputs of different lengths never share a padded block stream, so
/// `[x]` and `[x, 0]` hash apart.
pub fn hash(prefix: HashPrefix, xs: &[Fp]) -> Fp {
    let mut sponge = Sponge::for_prefix(prefix);
    sponge.tag_length(xs.len());
    sponge.absorb(xs);
    sponge.digest()
}

/// `digest(salt(phrase))`, the constant for an empty structure.
pub fn salt_digest(salt: Salt) -> Fp {
    Sponge::for_salt(salt).digest()
}
