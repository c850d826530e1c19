//! Synthesis errors.

use thiserror::Error;

/// Errors raised while synthesizing or checking a constraint system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The prover supplied a witness that does not fit the circuit shape.
    #[error("malformed witness: {message}")]
    MalformedWitness { message: &'static str },

    /// A recorded constraint does not hold for the assigned witness.
    #[error("unsatisfied constraint #{index}: {message}")]
    UnsatisfiedConstraint { index: usize, message: &'static str },

    /// A gadget was asked for something it cannot build.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Result alias used throughout the synthesis framework.
pub type Result<T, E = Error> = core::result::Result<T, E>;
