//! Optional verification keys in the circuit.

use pasta_curves::Fp;
use zkapp_synth::gadgets::{self, BoolWire};
use zkapp_synth::{Driver, Error, Maybe, WireValue, Witness};

use crate::verification_key::{dummy_vk_hash, VerificationKeyWithHash};

/// An optional verification key, reduced to the hash the account commits to.
///
/// `hash` is the key's hash when `is_some` holds and the dummy key's hash
/// otherwise. The dummy is a constant, so a prover cannot pair an absent key
/// with any other hash.
pub struct VerificationKeyVar<D: Driver<F = Fp>> {
    pub is_some: BoolWire<D>,
    pub hash: WireValue<D>,
}

impl<D: Driver<F = Fp>> Clone for VerificationKeyVar<D> {
    fn clone(&self) -> Self {
        VerificationKeyVar {
            is_some: self.is_some.clone(),
            hash: self.hash.clone(),
        }
    }
}

impl<D: Driver<F = Fp>> VerificationKeyVar<D> {
    pub fn alloc(dr: &mut D, vk: Witness<D, Option<&VerificationKeyWithHash>>) -> Result<Self, Error> {
        let is_some = BoolWire::alloc(dr, D::just(|| vk.snag().is_some()))?;
        let raw = WireValue::alloc(
            dr,
            D::just(|| vk.snag().map_or_else(dummy_vk_hash, |vk| vk.hash)),
        )?;
        let dummy = WireValue::constant(dr, dummy_vk_hash())?;
        let hash = gadgets::select(dr, &is_some, &raw, &dummy)?;
        Ok(VerificationKeyVar { is_some, hash })
    }

    pub fn is_some(&self) -> &BoolWire<D> {
        &self.is_some
    }

    pub fn hash(&self) -> &WireValue<D> {
        &self.hash
    }
}
