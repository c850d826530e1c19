//! zkApp URIs in the circuit.
//!
//! The account layout only needs the URI's hash, so by default the URI
//! enters as a witnessed hash with the string kept as prover-only data.
//! [`ZkappUriVar::alloc_bits`] instead constrains the full bit encoding for
//! a URI of a length fixed by the circuit.

use pasta_curves::Fp;
use zkapp_poseidon::gadget::{self, HashInputVar};
use zkapp_poseidon::prefixes;
use zkapp_synth::gadgets::BoolWire;
use zkapp_synth::{Driver, Error, Maybe, MaybeKind, WireValue, Witness};

use crate::error::{Result, ZkappError};
use crate::zkapp_uri::{hash_zkapp_uri, ZkappUri, MAX_URI_LENGTH};

/// A URI carried as its hash.
pub struct ZkappUriVar<D: Driver<F = Fp>> {
    pub hash: WireValue<D>,
    pub uri: Witness<D, ZkappUri>,
}

impl<D: Driver<F = Fp>> Clone for ZkappUriVar<D> {
    fn clone(&self) -> Self {
        ZkappUriVar {
            hash: self.hash.clone(),
            uri: D::MaybeKind::clone_rebind(&self.uri),
        }
    }
}

impl<D: Driver<F = Fp>> ZkappUriVar<D> {
    /// Witness the URI's hash.
    pub fn alloc(dr: &mut D, uri: Witness<D, ZkappUri>) -> Result<Self, Error> {
        let hash = WireValue::alloc(dr, D::just(|| uri.snag().hash()))?;
        Ok(ZkappUriVar { hash, uri })
    }

    /// A URI fixed at synthesis time.
    pub fn constant(dr: &mut D, uri: &ZkappUri) -> Result<Self, Error> {
        Ok(ZkappUriVar {
            hash: WireValue::constant(dr, uri.hash())?,
            uri: D::just(|| uri.clone()),
        })
    }

    /// The hash of an absent URI, as a constant.
    pub fn none_hash(dr: &mut D) -> Result<WireValue<D>, Error> {
        WireValue::constant(dr, hash_zkapp_uri(None))
    }

    /// Constrain the hash of a `len`-byte URI bit by bit.
    pub fn alloc_bits(dr: &mut D, len: usize, uri: Witness<D, ZkappUri>) -> Result<Self> {
        if len > MAX_URI_LENGTH {
            return Err(ZkappError::UriTooLong {
                len,
                max: MAX_URI_LENGTH,
            });
        }
        if D::has_witness() && uri.snag().len() != len {
            return Err(Error::MalformedWitness {
                message: "uri length differs from the allocated shape",
            }
            .into());
        }

        let mut input = HashInputVar::new();
        for i in 0..len * 8 {
            let bit = BoolWire::alloc(
                dr,
                D::just(|| (uri.snag().as_bytes()[i / 8] >> (i % 8)) & 1 == 1),
            )?;
            input = input.append(HashInputVar::packed(bit.wire, 1));
        }
        let terminator = BoolWire::constant(dr, true)?;
        input = input.append(HashInputVar::packed(terminator.wire, 1));

        let packed = input.pack_to_fields(dr)?;
        let hash = gadget::hash(dr, prefixes::ZKAPP_URI, &packed)?;
        Ok(ZkappUriVar { hash, uri })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkapp_synth::drivers::{CountingDriver, ProvingDriver};
    use zkapp_synth::{Always, Empty};

    #[test]
    fn bit_gadget_matches_native() {
        for bytes in [vec![], vec![0u8], b"zk".to_vec(), vec![0xff; 40]] {
            let uri = ZkappUri::new(bytes).unwrap();
            let mut dr = ProvingDriver::<Fp>::new();
            let var = ZkappUriVar::alloc_bits(&mut dr, uri.len(), Always(uri.clone())).unwrap();
            assert_eq!(dr.get_witness(var.hash.wire), uri.hash());
            assert!(dr.is_satisfied());
        }
    }

    #[test]
    fn witnessed_hash_matches_native() {
        let uri: ZkappUri = "https://zkapp.example".parse().unwrap();
        let mut dr = ProvingDriver::<Fp>::new();
        let var = ZkappUriVar::alloc(&mut dr, Always(uri.clone())).unwrap();
        assert_eq!(*var.hash.value.snag(), uri.hash());
        let none = ZkappUriVar::none_hash(&mut dr).unwrap();
        assert_ne!(dr.get_witness(none.wire), uri.hash());
    }

    #[test]
    fn shape_rejects_oversized_length() {
        let mut dr = CountingDriver::<Fp>::new();
        assert!(matches!(
            ZkappUriVar::alloc_bits(&mut dr, 256, Empty::new()),
            Err(ZkappError::UriTooLong { len: 256, .. })
        ));
        assert!(ZkappUriVar::alloc_bits(&mut dr, 255, Empty::new()).is_ok());
    }
}
