//! # zkapp-synth
//!
//! A small constraint-synthesis framework for the zkApp account circuits.
//!
//! Gadgets are written once, generic over a [`Driver`], and run unchanged in
//! two contexts:
//!
//! - [`drivers::ProvingDriver`] assigns witness values and records every
//!   multiplication gate and linear constraint, which can then be checked
//!   against the assignment.
//! - [`drivers::CountingDriver`] synthesizes the shape only. Witness closures
//!   are never run, so it doubles as a check that gadgets keep their witness
//!   access inside closures.
//!
//! Witness values travel in [`Maybe`] containers whose presence is fixed by
//! the driver's [`MaybeKind`]: `Always<T>` is a transparent wrapper and
//! `Empty<T>` is zero-sized.
//!
//! ```rust,ignore
//! use zkapp_synth::prelude::*;
//! use zkapp_synth::drivers::ProvingDriver;
//! use zkapp_synth::gadgets;
//!
//! let mut dr = ProvingDriver::<Fp>::new();
//! let x = WireValue::alloc(&mut dr, ProvingDriver::<Fp>::just(|| Fp::from(3)))?;
//! let y = gadgets::pow7(&mut dr, &x)?;
//! dr.check_constraints()?;
//! ```

pub mod circuit;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod gadgets;
pub mod maybe;
pub mod sink;

pub use circuit::Circuit;
pub use driver::{Driver, WireValue, WireValueVec, Witness};
pub use error::{Error, Result};
pub use maybe::{Always, AlwaysKind, Empty, EmptyKind, Maybe, MaybeKind};
pub use sink::Sink;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::circuit::Circuit;
    pub use crate::driver::{Driver, WireValue, Witness};
    pub use crate::error::{Error, Result};
    pub use crate::gadgets::BoolWire;
    pub use crate::maybe::{Always, Empty, Maybe, MaybeKind};
    pub use crate::sink::Sink;
}
