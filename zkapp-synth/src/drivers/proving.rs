//! Proving driver: assigns witness values and records every constraint.
//!
//! Witness closures always run under this driver. Constraints are recorded
//! rather than checked eagerly, so a dishonest witness does not abort
//! synthesis; it leaves behind a system that [`ProvingDriver::check_constraints`]
//! reports as unsatisfied, which is what a real backend would refuse to prove.

use ff::Field;

use crate::driver::Driver;
use crate::error::Error;
use crate::maybe::AlwaysKind;
use crate::sink::{CollectingSink, Sink};

/// A wire in the proving driver: a witness index and the assigned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvingWire<F> {
    /// Position in the witness vector.
    pub index: usize,
    /// Assigned value.
    pub value: F,
}

#[derive(Debug, Clone)]
enum Constraint<F> {
    /// `w[a] * w[b] = w[c]`
    Mul { a: usize, b: usize, c: usize },
    /// `Σ coeff · w[i] = 0`
    Linear { terms: Vec<(usize, F)> },
}

/// Driver that carries witness values and records the constraint system.
#[derive(Debug, Clone)]
pub struct ProvingDriver<F: Field> {
    witness: Vec<F>,
    constraints: Vec<Constraint<F>>,
    num_mul: usize,
    num_linear: usize,
}

impl<F: Field> ProvingDriver<F> {
    /// Create a driver holding only the ONE wire.
    pub fn new() -> Self {
        ProvingDriver {
            witness: vec![F::ONE],
            constraints: Vec::new(),
            num_mul: 0,
            num_linear: 0,
        }
    }

    fn push_wire(&mut self, value: F) -> ProvingWire<F> {
        let index = self.witness.len();
        self.witness.push(value);
        ProvingWire { index, value }
    }

    /// The value assigned to a wire.
    pub fn get_witness(&self, wire: ProvingWire<F>) -> F {
        self.witness[wire.index]
    }

    /// Number of wires, including ONE.
    pub fn num_wires(&self) -> usize {
        self.witness.len()
    }

    /// Number of multiplication gates.
    pub fn num_mul(&self) -> usize {
        self.num_mul
    }

    /// Number of recorded linear constraints.
    pub fn num_linear(&self) -> usize {
        self.num_linear
    }

    /// Check every recorded constraint against the assigned witness.
    pub fn check_constraints(&self) -> Result<(), Error> {
        for (index, constraint) in self.constraints.iter().enumerate() {
            let ok = match constraint {
                Constraint::Mul { a, b, c } => {
                    self.witness[*a] * self.witness[*b] == self.witness[*c]
                }
                Constraint::Linear { terms } => terms
                    .iter()
                    .fold(F::ZERO, |acc, (i, coeff)| acc + self.witness[*i] * coeff)
                    .is_zero_vartime(),
            };
            if !ok {
                let message = match constraint {
                    Constraint::Mul { .. } => "multiplication gate does not hold",
                    Constraint::Linear { .. } => "linear constraint is not zero",
                };
                tracing::debug!(index, message, "constraint check failed");
                return Err(Error::UnsatisfiedConstraint { index, message });
            }
        }
        Ok(())
    }

    /// Whether the recorded system is satisfied.
    pub fn is_satisfied(&self) -> bool {
        self.check_constraints().is_ok()
    }
}

impl<F: Field> Default for ProvingDriver<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> Driver for ProvingDriver<F> {
    type F = F;
    type W = ProvingWire<F>;
    type MaybeKind = AlwaysKind;
    type IO = CollectingSink<F>;

    const ONE: Self::W = ProvingWire {
        index: 0,
        value: F::ONE,
    };

    fn mul(
        &mut self,
        values: impl FnOnce() -> Result<(F, F, F), Error>,
    ) -> Result<(Self::W, Self::W, Self::W), Error> {
        let (a, b, c) = values()?;
        let a = self.push_wire(a);
        let b = self.push_wire(b);
        let c = self.push_wire(c);
        self.constraints.push(Constraint::Mul {
            a: a.index,
            b: b.index,
            c: c.index,
        });
        self.num_mul += 1;
        Ok((a, b, c))
    }

    fn add<L: IntoIterator<Item = (Self::W, F)>>(
        &mut self,
        lc: impl FnOnce() -> L,
    ) -> Result<Self::W, Error> {
        let mut terms: Vec<(usize, F)> = Vec::new();
        let mut sum = F::ZERO;
        for (wire, coeff) in lc() {
            sum += self.witness[wire.index] * coeff;
            terms.push((wire.index, coeff));
        }
        let out = self.push_wire(sum);
        terms.push((out.index, -F::ONE));
        self.constraints.push(Constraint::Linear { terms });
        self.num_linear += 1;
        Ok(out)
    }

    fn enforce_zero<L: IntoIterator<Item = (Self::W, F)>>(
        &mut self,
        lc: impl FnOnce() -> L,
    ) -> Result<(), Error> {
        let terms = lc()
            .into_iter()
            .map(|(wire, coeff)| (wire.index, coeff))
            .collect();
        self.constraints.push(Constraint::Linear { terms });
        self.num_linear += 1;
        Ok(())
    }
}

impl<F: Field> Sink<ProvingDriver<F>, ProvingWire<F>> for CollectingSink<F> {
    fn push(&mut self, wire: ProvingWire<F>) -> Result<(), Error> {
        self.inputs.push(wire.value);
        Ok(())
    }
}
