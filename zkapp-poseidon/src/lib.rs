//! # zkapp-poseidon
//!
//! Domain-separated Poseidon hashing over the Pallas base field, in two
//! bit-identical forms:
//!
//! - [`native`]: plain field arithmetic;
//! - [`gadget`]: the same computation synthesized through a
//!   [`zkapp_synth::Driver`].
//!
//! Hash inputs are canonicalised through [`HashInput`] (native) or
//! [`gadget::HashInputVar`] (in-circuit) before hashing.
//!
//! ```rust,ignore
//! use zkapp_poseidon::{hash, prefixes, HashInput};
//!
//! let input = HashInput::fields(&app_state).append(HashInput::u32(version));
//! let digest = hash(prefixes::ZKAPP_ACCOUNT, &input.pack_to_fields());
//! ```

pub mod gadget;
pub mod input;
pub mod native;
pub mod params;
pub mod prefix;

pub use input::HashInput;
pub use native::{hash, salt_digest, Sponge};
pub use prefix::{prefixes, salts, HashPrefix, Salt};
