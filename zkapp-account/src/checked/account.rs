//! The zkApp account in the circuit.
//!
//! Mirrors [`crate::account`]: the hash input is assembled from a table of
//! `(name, fn)` pairs whose names and order match
//! [`crate::account::ZKAPP_ACCOUNT_FIELDS`], so the constrained digest and
//! the native digest see the same layout.

use pasta_curves::Fp;
use zkapp_poseidon::gadget::{self, HashInputVar};
use zkapp_poseidon::prefixes;
use zkapp_synth::gadgets::{self, BoolWire};
use zkapp_synth::{Driver, Error, Maybe, WireValue, Witness};

use crate::account::{ZkappAccount, MAX_STATE_SIZE, SEQUENCE_STATE_LEN};
use crate::checked::verification_key::VerificationKeyVar;
use crate::checked::zkapp_uri::ZkappUriVar;

/// Width of the `u32` counters in the hash input.
const U32_BITS: u32 = 32;

/// An account whose fields are wires.
pub struct ZkappAccountVar<D: Driver<F = Fp>> {
    pub app_state: Vec<WireValue<D>>,
    pub verification_key: VerificationKeyVar<D>,
    pub zkapp_version: WireValue<D>,
    pub sequence_state: Vec<WireValue<D>>,
    pub last_sequence_slot: WireValue<D>,
    pub proved_state: BoolWire<D>,
    pub zkapp_uri: ZkappUriVar<D>,
}

impl<D: Driver<F = Fp>> Clone for ZkappAccountVar<D> {
    fn clone(&self) -> Self {
        ZkappAccountVar {
            app_state: self.app_state.clone(),
            verification_key: self.verification_key.clone(),
            zkapp_version: self.zkapp_version.clone(),
            sequence_state: self.sequence_state.clone(),
            last_sequence_slot: self.last_sequence_slot.clone(),
            proved_state: self.proved_state.clone(),
            zkapp_uri: self.zkapp_uri.clone(),
        }
    }
}

/// Contribution of one in-circuit field to the hash input.
pub type FieldInputVar<D> = fn(&ZkappAccountVar<D>) -> HashInputVar<D>;

/// In-circuit counterpart of [`crate::account::ZKAPP_ACCOUNT_FIELDS`].
pub fn field_inputs<D: Driver<F = Fp>>() -> [(&'static str, FieldInputVar<D>); 7] {
    [
        ("app_state", app_state_input::<D>),
        ("verification_key", verification_key_input::<D>),
        ("zkapp_version", zkapp_version_input::<D>),
        ("sequence_state", sequence_state_input::<D>),
        ("last_sequence_slot", last_sequence_slot_input::<D>),
        ("proved_state", proved_state_input::<D>),
        ("zkapp_uri", zkapp_uri_input::<D>),
    ]
}

fn app_state_input<D: Driver<F = Fp>>(a: &ZkappAccountVar<D>) -> HashInputVar<D> {
    HashInputVar::fields(&a.app_state)
}

fn verification_key_input<D: Driver<F = Fp>>(a: &ZkappAccountVar<D>) -> HashInputVar<D> {
    HashInputVar::field(a.verification_key.hash.clone())
}

fn zkapp_version_input<D: Driver<F = Fp>>(a: &ZkappAccountVar<D>) -> HashInputVar<D> {
    HashInputVar::packed(a.zkapp_version.clone(), U32_BITS)
}

fn sequence_state_input<D: Driver<F = Fp>>(a: &ZkappAccountVar<D>) -> HashInputVar<D> {
    HashInputVar::fields(&a.sequence_state)
}

fn last_sequence_slot_input<D: Driver<F = Fp>>(a: &ZkappAccountVar<D>) -> HashInputVar<D> {
    HashInputVar::packed(a.last_sequence_slot.clone(), U32_BITS)
}

fn proved_state_input<D: Driver<F = Fp>>(a: &ZkappAccountVar<D>) -> HashInputVar<D> {
    HashInputVar::packed(a.proved_state.wire.clone(), 1)
}

fn zkapp_uri_input<D: Driver<F = Fp>>(a: &ZkappAccountVar<D>) -> HashInputVar<D> {
    HashInputVar::field(a.zkapp_uri.hash.clone())
}

fn alloc_u32<D: Driver<F = Fp>>(dr: &mut D, value: Witness<D, Fp>) -> Result<WireValue<D>, Error> {
    let wire = WireValue::alloc(dr, value)?;
    gadgets::range_check(dr, &wire, U32_BITS as usize)?;
    Ok(wire)
}

impl<D: Driver<F = Fp>> ZkappAccountVar<D> {
    /// Lift a native account into wires.
    ///
    /// Counters are range-checked to 32 bits and `proved_state` is
    /// constrained boolean. The vk and the URI enter as their hashes.
    pub fn alloc(dr: &mut D, account: Witness<D, &ZkappAccount>) -> Result<Self, Error> {
        let app_state = (0..MAX_STATE_SIZE)
            .map(|i| WireValue::alloc(dr, D::just(|| account.snag().app_state[i])))
            .collect::<Result<Vec<_>, _>>()?;
        let verification_key = VerificationKeyVar::alloc(
            dr,
            D::just(|| account.snag().verification_key.as_ref()),
        )?;
        let zkapp_version = alloc_u32(
            dr,
            D::just(|| Fp::from(u64::from(account.snag().zkapp_version))),
        )?;
        let sequence_state = (0..SEQUENCE_STATE_LEN)
            .map(|i| WireValue::alloc(dr, D::just(|| account.snag().sequence_state[i])))
            .collect::<Result<Vec<_>, _>>()?;
        let last_sequence_slot = alloc_u32(
            dr,
            D::just(|| Fp::from(u64::from(account.snag().last_sequence_slot))),
        )?;
        let proved_state = BoolWire::alloc(dr, D::just(|| account.snag().proved_state))?;
        let zkapp_uri = ZkappUriVar::alloc(dr, D::just(|| account.snag().zkapp_uri.clone()))?;

        Ok(ZkappAccountVar {
            app_state,
            verification_key,
            zkapp_version,
            sequence_state,
            last_sequence_slot,
            proved_state,
            zkapp_uri,
        })
    }

    pub fn to_input(&self) -> HashInputVar<D> {
        field_inputs::<D>()
            .iter()
            .map(|(_, input)| input(self))
            .collect()
    }

    /// In-circuit [`ZkappAccount::digest`].
    pub fn digest(&self, dr: &mut D) -> Result<WireValue<D>, Error> {
        let packed = self.to_input().pack_to_fields(dr)?;
        gadget::hash(dr, prefixes::ZKAPP_ACCOUNT, &packed)
    }
}
