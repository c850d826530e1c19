//! In-circuit forms of the account commitments.
//!
//! Each type here mirrors a native one and is generic over the synthesis
//! [`zkapp_synth::Driver`]. For every genuine witness the constrained digest
//! equals the native one.

pub mod account;
pub mod event;
pub mod log;
pub mod verification_key;
pub mod zkapp_uri;

pub use account::{field_inputs, FieldInputVar, ZkappAccountVar};
pub use event::{EventHashVar, EventVar};
pub use log::LogVar;
pub use verification_key::VerificationKeyVar;
pub use zkapp_uri::ZkappUriVar;
