//! Decimal string encoding of field elements.
//!
//! Field elements travel as base-10 strings in JSON, the way ledger tooling
//! prints them. Parsing rejects anything at or above the field modulus.

use ff::PrimeField;
use num_bigint::BigUint;
use pasta_curves::Fp;

use crate::error::{Result, ZkappError};

/// Render a field element as a decimal string.
pub fn fp_to_decimal(x: &Fp) -> String {
    BigUint::from_bytes_le(x.to_repr().as_ref()).to_string()
}

/// Parse a decimal string into a field element.
pub fn fp_from_decimal(s: &str) -> Result<Fp> {
    let n: BigUint = s
        .parse()
        .map_err(|_| ZkappError::InvalidEncoding(format!("invalid field value: {s}")))?;
    let bytes = n.to_bytes_le();
    if bytes.len() > 32 {
        return Err(ZkappError::InvalidEncoding(format!(
            "field value out of range: {s}"
        )));
    }
    let mut repr = [0u8; 32];
    repr[..bytes.len()].copy_from_slice(&bytes);
    Option::from(Fp::from_repr(repr))
        .ok_or_else(|| ZkappError::InvalidEncoding(format!("field value out of range: {s}")))
}

/// `#[serde(with = "fp_decimal")]` for a single `Fp`.
pub mod fp_decimal {
    use pasta_curves::Fp;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(x: &Fp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::fp_to_decimal(x))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Fp, D::Error> {
        let s = String::deserialize(d)?;
        super::fp_from_decimal(&s).map_err(D::Error::custom)
    }
}

/// `#[serde(with = "fp_vec")]` for `Vec<Fp>`.
pub mod fp_vec {
    use pasta_curves::Fp;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(xs: &[Fp], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(xs.iter().map(super::fp_to_decimal))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Fp>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|s| super::fp_from_decimal(s).map_err(D::Error::custom))
            .collect()
    }
}

/// `#[serde(with = "fp_array")]` for `[Fp; N]`.
pub mod fp_array {
    use pasta_curves::Fp;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(xs: &[Fp; N], s: S) -> Result<S::Ok, S::Error> {
        super::fp_vec::serialize(xs, s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(d: D) -> Result<[Fp; N], D::Error> {
        let xs = super::fp_vec::deserialize(d)?;
        let len = xs.len();
        <[Fp; N]>::try_from(xs).map_err(|_| D::Error::invalid_length(len, &"a fixed-size field array"))
    }
}
