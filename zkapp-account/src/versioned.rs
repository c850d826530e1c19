//! Versioned JSON encoding of zkApp accounts.
//!
//! Every stored account is wrapped as `{"version": N, "account": {...}}`.
//! Version 1 predates the zkApp URI; version 2 is the current layout.
//! Decoding accepts any known version, encoding always writes the current
//! one, and each version transition has exactly one migration function.

use pasta_curves::Fp;
use serde::{Deserialize, Serialize};

use crate::account::{ZkappAccount, MAX_STATE_SIZE, SEQUENCE_STATE_LEN};
use crate::error::{Result, ZkappError};
use crate::verification_key::VerificationKeyWithHash;
use crate::zkapp_uri::ZkappUri;

/// Version written by [`VersionedZkappAccount::to_json`].
pub const CURRENT_VERSION: u32 = 2;

/// Account layout before the URI field existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkappAccountV1 {
    #[serde(with = "crate::field::fp_array")]
    pub app_state: [Fp; MAX_STATE_SIZE],
    pub verification_key: Option<VerificationKeyWithHash>,
    pub zkapp_version: u32,
    #[serde(with = "crate::field::fp_array")]
    pub sequence_state: [Fp; SEQUENCE_STATE_LEN],
    pub last_sequence_slot: u32,
    pub proved_state: bool,
}

/// An account tagged with its layout version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedZkappAccount {
    V1(ZkappAccountV1),
    V2(ZkappAccount),
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    account: serde_json::Value,
}

/// Version 1 accounts had no URI; they migrate with the empty one.
pub fn migrate_v1_to_v2(v1: ZkappAccountV1) -> ZkappAccount {
    ZkappAccount {
        app_state: v1.app_state,
        verification_key: v1.verification_key,
        zkapp_version: v1.zkapp_version,
        sequence_state: v1.sequence_state,
        last_sequence_slot: v1.last_sequence_slot,
        proved_state: v1.proved_state,
        zkapp_uri: ZkappUri::default(),
    }
}

impl VersionedZkappAccount {
    pub fn version(&self) -> u32 {
        match self {
            VersionedZkappAccount::V1(_) => 1,
            VersionedZkappAccount::V2(_) => 2,
        }
    }

    /// Migrate to the current layout.
    pub fn into_current(self) -> ZkappAccount {
        match self {
            VersionedZkappAccount::V1(v1) => migrate_v1_to_v2(v1),
            VersionedZkappAccount::V2(v2) => v2,
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(s)?;
        match envelope.version {
            1 => Ok(VersionedZkappAccount::V1(serde_json::from_value(envelope.account)?)),
            2 => Ok(VersionedZkappAccount::V2(serde_json::from_value(envelope.account)?)),
            other => {
                tracing::debug!(version = other, "rejecting unknown account version");
                Err(ZkappError::InvalidEncoding(format!(
                    "unsupported account version {other}"
                )))
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let account = match self {
            VersionedZkappAccount::V1(v1) => serde_json::to_value(v1)?,
            VersionedZkappAccount::V2(v2) => serde_json::to_value(v2)?,
        };
        Ok(serde_json::to_string_pretty(&Envelope {
            version: self.version(),
            account,
        })?)
    }
}

impl From<ZkappAccount> for VersionedZkappAccount {
    fn from(account: ZkappAccount) -> Self {
        VersionedZkappAccount::V2(account)
    }
}

/// Decode any known version and migrate to the current layout.
pub fn account_from_json(s: &str) -> Result<ZkappAccount> {
    VersionedZkappAccount::from_json(s).map(VersionedZkappAccount::into_current)
}

/// Encode an account at [`CURRENT_VERSION`].
pub fn account_to_json(account: &ZkappAccount) -> Result<String> {
    VersionedZkappAccount::V2(account.clone()).to_json()
}
