//! # zkapp-account
//!
//! Commitments to the zkApp part of an account:
//!
//! - events and actions logs, folded into a single digest per log
//!   ([`log`], checked form in [`checked::log`]);
//! - the zkApp URI and its hash ([`zkapp_uri`]);
//! - optional verification keys with a dummy-key fallback
//!   ([`verification_key`]);
//! - the account digest over an ordered field table ([`account`]).
//!
//! Every native computation has an in-circuit counterpart under
//! [`checked`] producing the same digest for the same values. The
//! [`circuit::AccountDigestCircuit`] ties the account digest to a public
//! input.

pub mod account;
pub mod checked;
pub mod circuit;
pub mod error;
pub mod event;
pub mod field;
pub mod log;
pub mod verification_key;
pub mod versioned;
pub mod zkapp_uri;

pub use account::{SequenceState, ZkappAccount, MAX_STATE_SIZE, SEQUENCE_STATE_LEN};
pub use circuit::AccountDigestCircuit;
pub use error::{Result, ZkappError};
pub use event::Event;
pub use log::{Actions, Events, LogFrame, LogKind, LogParts, LogStack};
pub use verification_key::{ProofsVerified, VerificationKey, VerificationKeyWithHash};
pub use versioned::{account_from_json, account_to_json, VersionedZkappAccount};
pub use zkapp_uri::{hash_zkapp_uri, ZkappUri, MAX_URI_LENGTH};
