//! zkApp URI codec.
//!
//! A URI is an arbitrary byte string of at most [`MAX_URI_LENGTH`] bytes.
//! Its hash input is the bit string of the bytes (least significant bit of
//! each byte first) followed by a single `1` bit, so no two byte strings of
//! different lengths share an encoding, trailing zero bytes included.

use std::fmt;
use std::str::FromStr;

use ff::Field;
use pasta_curves::Fp;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use zkapp_poseidon::{hash, prefixes, HashInput};

use crate::error::{Result, ZkappError};

/// Longest URI the protocol accepts.
pub const MAX_URI_LENGTH: usize = 255;

/// Leading byte of the binary wire form.
pub const URI_WIRE_VERSION: u8 = 1;

/// A length-checked zkApp URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ZkappUri(Vec<u8>);

impl ZkappUri {
    /// Validate and wrap raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        Self::check(&bytes)?;
        Ok(ZkappUri(bytes))
    }

    /// Validate an externally supplied URI.
    pub fn check(bytes: &[u8]) -> Result<()> {
        if bytes.len() > MAX_URI_LENGTH {
            tracing::debug!(len = bytes.len(), "rejecting oversized zkapp uri");
            return Err(ZkappError::UriTooLong {
                len: bytes.len(),
                max: MAX_URI_LENGTH,
            });
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bits of every byte, least significant first.
    pub fn to_bits(&self) -> Vec<bool> {
        bytes_to_bits(&self.0)
    }

    /// Inverse of [`ZkappUri::to_bits`].
    pub fn from_bits(bits: &[bool]) -> Result<Self> {
        if bits.len() % 8 != 0 {
            return Err(ZkappError::InvalidEncoding(format!(
                "uri bit string of length {} is not byte aligned",
                bits.len()
            )));
        }
        let bytes: Vec<u8> = bits
            .chunks(8)
            .map(|byte| {
                byte.iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, bit)| acc | (u8::from(*bit) << i))
            })
            .collect();
        Self::new(bytes)
    }

    /// Hash input: the bits, a terminating `1`, all as 1-bit chunks.
    pub fn to_input(&self) -> HashInput {
        let mut bits = self.to_bits();
        bits.push(true);
        HashInput::bits(&bits)
    }

    /// Hash of the URI.
    pub fn hash(&self) -> Fp {
        hash(prefixes::ZKAPP_URI, &self.to_input().pack_to_fields())
    }

    /// `[version][len][bytes]`
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() + 2);
        out.push(URI_WIRE_VERSION);
        // len <= 255 by construction
        out.push(self.0.len() as u8);
        out.extend_from_slice(&self.0);
        out
    }

    /// Parse the binary wire form. Trailing bytes are rejected.
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [URI_WIRE_VERSION, len, rest @ ..] if rest.len() == usize::from(*len) => {
                Self::new(rest.to_vec())
            }
            [URI_WIRE_VERSION, len, rest @ ..] => Err(ZkappError::InvalidEncoding(format!(
                "uri wire length {} does not match {} payload bytes",
                len,
                rest.len()
            ))),
            [URI_WIRE_VERSION] => Err(ZkappError::InvalidEncoding(
                "truncated uri wire form".into(),
            )),
            [version, ..] => Err(ZkappError::InvalidEncoding(format!(
                "unsupported uri wire version {version}"
            ))),
            [] => Err(ZkappError::InvalidEncoding("empty uri wire form".into())),
        }
    }
}

/// Hash of an optional URI. `None` hashes `[0, 0]` so it never collides
/// with any present URI, the empty one included.
pub fn hash_zkapp_uri(uri: Option<&ZkappUri>) -> Fp {
    match uri {
        Some(uri) => uri.hash(),
        None => hash(prefixes::ZKAPP_URI, &[Fp::ZERO, Fp::ZERO]),
    }
}

pub(crate) fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

impl TryFrom<String> for ZkappUri {
    type Error = ZkappError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s.into_bytes())
    }
}

impl TryFrom<&[u8]> for ZkappUri {
    type Error = ZkappError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }
}

impl FromStr for ZkappUri {
    type Err = ZkappError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.as_bytes().to_vec())
    }
}

impl fmt::Display for ZkappUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// JSON form: the raw bytes as lowercase hex, so binary URIs survive a
/// round trip.
impl Serialize for ZkappUri {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for ZkappUri {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        let bytes = hex::decode(&s).map_err(de::Error::custom)?;
        ZkappUri::new(bytes).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_limit_is_inclusive() {
        assert!(ZkappUri::new(vec![b'a'; 255]).is_ok());
        assert_eq!(
            ZkappUri::new(vec![b'a'; 256]),
            Err(ZkappError::UriTooLong { len: 256, max: 255 })
        );
    }

    #[test]
    fn bits_are_lsb_first() {
        let uri = ZkappUri::new(vec![0b0000_0101]).unwrap();
        assert_eq!(
            uri.to_bits(),
            vec![true, false, true, false, false, false, false, false]
        );
        assert!(ZkappUri::from_bits(&[true; 7]).is_err());
    }

    #[test]
    fn terminator_separates_trailing_nulls() {
        let a = ZkappUri::new(vec![]).unwrap();
        let b = ZkappUri::new(vec![0]).unwrap();
        let c = ZkappUri::new(vec![0, 0]).unwrap();
        assert_ne!(a.hash(), b.hash());
        assert_ne!(b.hash(), c.hash());
        assert_ne!(hash_zkapp_uri(None), a.hash());
    }

    #[test]
    fn wire_form_rejects_bad_headers() {
        assert!(ZkappUri::from_wire(&[2, 0]).is_err());
        assert!(ZkappUri::from_wire(&[1, 3, b'a', b'b']).is_err());
        assert!(ZkappUri::from_wire(&[1, 1, b'a', b'b']).is_err());
        assert!(ZkappUri::from_wire(&[]).is_err());
        assert!(ZkappUri::from_wire(&[1]).is_err());
        assert_eq!(
            ZkappUri::from_wire(&[1, 2, b'h', b'i']).unwrap().as_bytes(),
            b"hi"
        );
    }

    #[test]
    fn json_is_hex_of_the_bytes() {
        let uri: ZkappUri = "zk".parse().unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, r#""7a6b""#);
        assert_eq!(serde_json::from_str::<ZkappUri>(&json).unwrap(), uri);

        let binary = ZkappUri::new(vec![0x00, 0xff, 0xfe]).unwrap();
        let json = serde_json::to_string(&binary).unwrap();
        assert_eq!(json, r#""00fffe""#);
        assert_eq!(serde_json::from_str::<ZkappUri>(&json).unwrap(), binary);

        let long = format!("\"{}\"", "00".repeat(256));
        assert!(serde_json::from_str::<ZkappUri>(&long).is_err());
        assert!(serde_json::from_str::<ZkappUri>(r#""not hex""#).is_err());
    }
}
