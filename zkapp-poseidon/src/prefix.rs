//! Domain separation for the sponge.
//!
//! Every use site hashes under its own [`HashPrefix`]; empty-log constants
//! are derived from [`Salt`] phrases. Both are opaque wrappers around a
//! static string so a raw string can never be passed where a domain is
//! expected.

use ff::Field;
use pasta_curves::Fp;

/// Prefixes are right-padded with `*` to this many bytes.
pub const PREFIX_LENGTH: usize = 20;

/// Longest phrase that still fits in one field element.
pub const MAX_SALT_LENGTH: usize = 31;

/// A hash domain prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashPrefix(&'static str);

impl HashPrefix {
    /// Panics at compile time for prefixes that do not fit the padded width.
    pub const fn new(s: &'static str) -> Self {
        assert!(s.len() <= PREFIX_LENGTH, "hash prefix longer than 20 bytes");
        HashPrefix(s)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The prefix padded with `*` to 20 bytes.
    pub fn padded(&self) -> [u8; PREFIX_LENGTH] {
        let mut out = [b'*'; PREFIX_LENGTH];
        out[..self.0.len()].copy_from_slice(self.0.as_bytes());
        out
    }

    /// Field element the sponge is salted with.
    pub fn to_field(&self) -> Fp {
        fp_from_le_bytes(&self.padded())
    }
}

/// A salt phrase for a derived constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt(&'static str);

impl Salt {
    pub const fn new(s: &'static str) -> Self {
        assert!(s.len() <= MAX_SALT_LENGTH, "salt phrase longer than 31 bytes");
        Salt(s)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Field element the sponge is salted with. No padding.
    pub fn to_field(&self) -> Fp {
        fp_from_le_bytes(self.0.as_bytes())
    }
}

/// Read bytes as a little-endian integer. Callers keep inputs under 32 bytes.
pub(crate) fn fp_from_le_bytes(bytes: &[u8]) -> Fp {
    let base = Fp::from(256);
    bytes
        .iter()
        .rev()
        .fold(Fp::ZERO, |acc, b| acc * base + Fp::from(u64::from(*b)))
}

/// Use-site prefixes.
pub mod prefixes {
    use super::HashPrefix;

    pub const ZKAPP_EVENT: HashPrefix = HashPrefix::new("MinaZkappEvent");
    pub const ZKAPP_EVENTS: HashPrefix = HashPrefix::new("MinaZkappEvents");
    pub const ZKAPP_ACTIONS: HashPrefix = HashPrefix::new("MinaZkappSeqEvents");
    pub const ZKAPP_ACCOUNT: HashPrefix = HashPrefix::new("MinaZkappAccount");
    pub const ZKAPP_URI: HashPrefix = HashPrefix::new("MinaZkappUri");
    pub const SIDE_LOADED_VK: HashPrefix = HashPrefix::new("MinaSideLoadedVk");
}

/// Salt phrases for empty-structure constants.
pub mod salts {
    use super::Salt;

    pub const EVENTS_EMPTY: Salt = Salt::new("MinaZkappEventsEmpty");
    pub const ACTIONS_EMPTY: Salt = Salt::new("MinaZkappActionsEmpty");
    pub const ACTION_STATE_EMPTY_ELT: Salt = Salt::new("MinaZkappActionStateEmptyElt");
}
