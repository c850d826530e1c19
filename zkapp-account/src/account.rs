//! The zkApp part of an account and its commitment.
//!
//! The digest is `hash(account_prefix, pack(to_input(account)))`, where
//! `to_input` walks [`ZKAPP_ACCOUNT_FIELDS`] in order. The in-circuit
//! account in [`crate::checked::account`] walks a table with the same names
//! in the same order.

use ff::Field;
use once_cell::sync::Lazy;
use pasta_curves::Fp;
use serde::{Deserialize, Serialize};
use zkapp_poseidon::{hash, prefixes, HashInput};

use crate::event::Event;
use crate::log::Actions;
use crate::verification_key::{vk_hash_or_dummy, VerificationKeyWithHash};
use crate::zkapp_uri::ZkappUri;

/// Number of application state slots.
pub const MAX_STATE_SIZE: usize = 8;

/// Number of action-state digests kept per account.
pub const SEQUENCE_STATE_LEN: usize = 5;

/// zkApp fields of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkappAccount {
    #[serde(with = "crate::field::fp_array")]
    pub app_state: [Fp; MAX_STATE_SIZE],
    pub verification_key: Option<VerificationKeyWithHash>,
    pub zkapp_version: u32,
    /// Most recent action-state digests, newest first.
    #[serde(with = "crate::field::fp_array")]
    pub sequence_state: [Fp; SEQUENCE_STATE_LEN],
    pub last_sequence_slot: u32,
    pub proved_state: bool,
    pub zkapp_uri: ZkappUri,
}

/// Contribution of one account field to the hash input.
pub type FieldInput = fn(&ZkappAccount) -> HashInput;

/// Hashing order of the account fields.
pub const ZKAPP_ACCOUNT_FIELDS: [(&str, FieldInput); 7] = [
    ("app_state", app_state_input),
    ("verification_key", verification_key_input),
    ("zkapp_version", zkapp_version_input),
    ("sequence_state", sequence_state_input),
    ("last_sequence_slot", last_sequence_slot_input),
    ("proved_state", proved_state_input),
    ("zkapp_uri", zkapp_uri_input),
];

fn app_state_input(a: &ZkappAccount) -> HashInput {
    HashInput::fields(&a.app_state)
}

fn verification_key_input(a: &ZkappAccount) -> HashInput {
    HashInput::field(vk_hash_or_dummy(a.verification_key.as_ref()))
}

fn zkapp_version_input(a: &ZkappAccount) -> HashInput {
    HashInput::u32(a.zkapp_version)
}

fn sequence_state_input(a: &ZkappAccount) -> HashInput {
    HashInput::fields(&a.sequence_state)
}

fn last_sequence_slot_input(a: &ZkappAccount) -> HashInput {
    HashInput::u32(a.last_sequence_slot)
}

fn proved_state_input(a: &ZkappAccount) -> HashInput {
    HashInput::bool(a.proved_state)
}

fn zkapp_uri_input(a: &ZkappAccount) -> HashInput {
    HashInput::field(a.zkapp_uri.hash())
}

impl Default for ZkappAccount {
    fn default() -> Self {
        ZkappAccount {
            app_state: [Fp::ZERO; MAX_STATE_SIZE],
            verification_key: None,
            zkapp_version: 0,
            sequence_state: [Actions::empty_state_element(); SEQUENCE_STATE_LEN],
            last_sequence_slot: 0,
            proved_state: false,
            zkapp_uri: ZkappUri::default(),
        }
    }
}

static DEFAULT_DIGEST: Lazy<Fp> = Lazy::new(|| {
    let digest = ZkappAccount::default().digest();
    tracing::debug!("computed default zkapp account digest");
    digest
});

impl ZkappAccount {
    /// Field names in hashing order.
    pub fn field_names() -> [&'static str; 7] {
        ZKAPP_ACCOUNT_FIELDS.map(|(name, _)| name)
    }

    pub fn to_input(&self) -> HashInput {
        ZKAPP_ACCOUNT_FIELDS
            .iter()
            .map(|(_, input)| input(self))
            .collect()
    }

    pub fn digest(&self) -> Fp {
        hash(prefixes::ZKAPP_ACCOUNT, &self.to_input().pack_to_fields())
    }

    /// Digest of [`ZkappAccount::default`], computed once.
    pub fn default_digest() -> Fp {
        *DEFAULT_DIGEST
    }

    /// The action-state window of this account.
    pub fn sequence(&self) -> SequenceState {
        SequenceState {
            elements: self.sequence_state,
            last_slot: self.last_sequence_slot,
        }
    }

    /// Record a batch of actions dispatched at `txn_slot`.
    pub fn apply_actions(&mut self, actions: &[Event], txn_slot: u32) {
        let next = self.sequence().update(actions, txn_slot);
        self.sequence_state = next.elements;
        self.last_sequence_slot = next.last_slot;
    }
}

/// Rolling window of action-state digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceState {
    /// Newest first.
    pub elements: [Fp; SEQUENCE_STATE_LEN],
    /// Slot of the most recent non-empty batch.
    pub last_slot: u32,
}

impl SequenceState {
    /// Fold a batch of actions into the window.
    ///
    /// An empty batch changes nothing. Otherwise slot 0 absorbs the batch,
    /// and when `txn_slot` differs from `last_slot` the older slots shift
    /// down by one, receiving the previous slot 0.
    pub fn update(&self, actions: &[Event], txn_slot: u32) -> SequenceState {
        if actions.is_empty() {
            return *self;
        }
        let [s1, s2, s3, s4, s5] = self.elements;
        let s1_new = Actions::push_events(s1, actions);
        let elements = if txn_slot == self.last_slot {
            [s1_new, s2, s3, s4, s5]
        } else {
            [s1_new, s1, s2, s3, s4]
        };
        SequenceState {
            elements,
            last_slot: txn_slot,
        }
    }
}
