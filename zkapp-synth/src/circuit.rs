//! Circuit definition trait.
//!
//! Synthesis is split into three phases:
//!
//! 1. **`input`**: turn the public instance into the circuit's IO
//! 2. **`main`**: constrain the private witness, producing IO and auxiliary data
//! 3. **`output`**: write the IO into the driver's public-input sink
//!
//! ```text
//! Verification path:
//! Instance → input() → IO → output() → Public Input
//!
//! Proving path:
//! Witness → main() → (IO, Aux) → output() → Public Input
//! ```
//!
//! Both paths end in the same `output`, so a prover and a verifier derive
//! public inputs through identical code.

use ff::Field;

use crate::driver::{Driver, Witness};
use crate::error::Error;

/// A circuit that can be proven and verified.
pub trait Circuit<F: Field>: Sized {
    /// The public instance the verifier sees.
    type Instance<'instance>;

    /// The IO flowing from `input`/`main` into `output`.
    type IO<'source, D: Driver<F = F>>;

    /// The private witness.
    type Witness<'witness>;

    /// Auxiliary prover-side data returned from `main`.
    type Aux<'witness>;

    /// Transform instance data into circuit IO.
    fn input<'instance, D: Driver<F = F>>(
        &self,
        dr: &mut D,
        input: Witness<D, Self::Instance<'instance>>,
    ) -> Result<Self::IO<'instance, D>, Error>;

    /// Synthesize all constraints over the witness.
    fn main<'witness, D: Driver<F = F>>(
        &self,
        dr: &mut D,
        witness: Witness<D, Self::Witness<'witness>>,
    ) -> Result<(Self::IO<'witness, D>, Witness<D, Self::Aux<'witness>>), Error>;

    /// Write the IO to the public-input sink.
    fn output<'source, D: Driver<F = F>>(
        &self,
        dr: &mut D,
        io: Self::IO<'source, D>,
        output: &mut D::IO,
    ) -> Result<(), Error>;

    /// Run `main` then `output`.
    fn synthesize_prove<'witness, D: Driver<F = F>>(
        &self,
        dr: &mut D,
        witness: Witness<D, Self::Witness<'witness>>,
        output: &mut D::IO,
    ) -> Result<Witness<D, Self::Aux<'witness>>, Error> {
        let (io, aux) = self.main(dr, witness)?;
        self.output(dr, io, output)?;
        Ok(aux)
    }

    /// Run `input` then `output`.
    fn synthesize_verify<'instance, D: Driver<F = F>>(
        &self,
        dr: &mut D,
        instance: Witness<D, Self::Instance<'instance>>,
        output: &mut D::IO,
    ) -> Result<(), Error> {
        let io = self.input(dr, instance)?;
        self.output(dr, io, output)
    }
}
