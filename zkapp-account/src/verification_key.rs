//! Side-loaded verification keys.
//!
//! The account commits to a verification key only through its hash. An
//! account without a key commits to the hash of a fixed dummy key instead,
//! which is neither zero nor any empty-log constant.

use ff::Field;
use once_cell::sync::Lazy;
use pasta_curves::Fp;
use serde::{Deserialize, Serialize};
use zkapp_poseidon::{hash, prefixes, HashInput};

/// Bytes packed into each field element of the key's hash input.
const BYTES_PER_FIELD: usize = 31;

/// Maximum number of proofs a circuit verifies recursively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofsVerified {
    N0,
    N1,
    N2,
}

impl ProofsVerified {
    pub fn as_u8(self) -> u8 {
        match self {
            ProofsVerified::N0 => 0,
            ProofsVerified::N1 => 1,
            ProofsVerified::N2 => 2,
        }
    }
}

/// Verification key data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey {
    pub max_proofs_verified: ProofsVerified,
    /// Serialized wrap-circuit verifier index.
    #[serde(with = "hex_bytes")]
    pub wrap_index: Vec<u8>,
}

impl VerificationKey {
    /// The key committed to by accounts that have none.
    pub fn dummy() -> Self {
        VerificationKey {
            max_proofs_verified: ProofsVerified::N2,
            wrap_index: b"zkapp-account/dummy-verification-key".to_vec(),
        }
    }

    /// Index bytes in 31-byte little-endian field chunks, then the index
    /// length and the proof count as packed chunks.
    pub fn to_input(&self) -> HashInput {
        let chunks: Vec<Fp> = self
            .wrap_index
            .chunks(BYTES_PER_FIELD)
            .map(|chunk| {
                chunk
                    .iter()
                    .rev()
                    .fold(Fp::ZERO, |acc, b| acc * Fp::from(256) + Fp::from(u64::from(*b)))
            })
            .collect();
        // Index lengths beyond u32 are not representable on chain.
        let len = u32::try_from(self.wrap_index.len()).unwrap_or(u32::MAX);
        HashInput::fields(&chunks)
            .append(HashInput::u32(len))
            .append(HashInput::packed(
                Fp::from(u64::from(self.max_proofs_verified.as_u8())),
                2,
            ))
    }

    pub fn hash(&self) -> Fp {
        hash(prefixes::SIDE_LOADED_VK, &self.to_input().pack_to_fields())
    }
}

/// A verification key with its memoised hash.
///
/// Serialized as the bare key; the hash is recomputed on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VerificationKey", into = "VerificationKey")]
pub struct VerificationKeyWithHash {
    pub data: VerificationKey,
    pub hash: Fp,
}

impl VerificationKeyWithHash {
    pub fn new(data: VerificationKey) -> Self {
        let hash = data.hash();
        VerificationKeyWithHash { data, hash }
    }
}

impl From<VerificationKey> for VerificationKeyWithHash {
    fn from(data: VerificationKey) -> Self {
        Self::new(data)
    }
}

impl From<VerificationKeyWithHash> for VerificationKey {
    fn from(vk: VerificationKeyWithHash) -> Self {
        vk.data
    }
}

static DUMMY_VK_HASH: Lazy<Fp> = Lazy::new(|| {
    tracing::debug!("computing dummy verification key hash");
    VerificationKey::dummy().hash()
});

/// Hash of [`VerificationKey::dummy`].
pub fn dummy_vk_hash() -> Fp {
    *DUMMY_VK_HASH
}

/// Hash an optional key, substituting the dummy hash when absent.
pub fn vk_hash_or_dummy(vk: Option<&VerificationKeyWithHash>) -> Fp {
    vk.map_or_else(dummy_vk_hash, |vk| vk.hash)
}

mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{Actions, Events, LogKind};

    #[test]
    fn dummy_hash_is_distinct() {
        let dummy = dummy_vk_hash();
        assert_ne!(dummy, Fp::ZERO);
        assert_ne!(dummy, Events::empty_digest());
        assert_ne!(dummy, Actions::empty_digest());
        assert_ne!(dummy, Actions::empty_state_element());
        assert_eq!(vk_hash_or_dummy(None), dummy);
    }

    #[test]
    fn trailing_zero_bytes_change_the_hash() {
        let a = VerificationKey {
            max_proofs_verified: ProofsVerified::N1,
            wrap_index: vec![1, 2, 3],
        };
        let mut b = a.clone();
        b.wrap_index.push(0);
        assert_ne!(a.hash(), b.hash());

        let mut c = a.clone();
        c.max_proofs_verified = ProofsVerified::N0;
        assert_ne!(a.hash(), c.hash());
    }

    #[test]
    fn json_recomputes_hash() {
        let vk = VerificationKeyWithHash::new(VerificationKey {
            max_proofs_verified: ProofsVerified::N2,
            wrap_index: vec![0xde, 0xad],
        });
        let json = serde_json::to_string(&vk).unwrap();
        assert_eq!(json, r#"{"max_proofs_verified":"N2","wrap_index":"dead"}"#);
        let back: VerificationKeyWithHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vk);
    }
}
