//! A circuit publishing the digest of a zkApp account.
//!
//! The prover lifts a native account into wires and publishes its digest.
//! The verifier publishes the digest it expects. Both public-input vectors
//! come out of the same `output`, so they agree exactly when the prover's
//! account hashes to the expected digest.

use pasta_curves::Fp;
use zkapp_synth::drivers::{CircuitStats, CountingDriver, ProvingDriver};
use zkapp_synth::sink::{CollectingSink, CountingSink};
use zkapp_synth::{Always, Circuit, Driver, Empty, Error, Maybe, Sink, WireValue, Witness};

use crate::account::ZkappAccount;
use crate::checked::ZkappAccountVar;

/// Publishes `digest(account)` as the only public input.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountDigestCircuit;

impl Circuit<Fp> for AccountDigestCircuit {
    type Instance<'instance> = Fp;
    type IO<'source, D: Driver<F = Fp>> = WireValue<D>;
    type Witness<'witness> = &'witness ZkappAccount;
    type Aux<'witness> = Fp;

    fn input<'instance, D: Driver<F = Fp>>(
        &self,
        dr: &mut D,
        input: Witness<D, Self::Instance<'instance>>,
    ) -> Result<Self::IO<'instance, D>, Error> {
        WireValue::alloc(dr, input)
    }

    fn main<'witness, D: Driver<F = Fp>>(
        &self,
        dr: &mut D,
        witness: Witness<D, Self::Witness<'witness>>,
    ) -> Result<(Self::IO<'witness, D>, Witness<D, Self::Aux<'witness>>), Error> {
        let account = ZkappAccountVar::alloc(dr, witness)?;
        let digest = account.digest(dr)?;
        let aux = D::just(|| *digest.value.snag());
        Ok((digest, aux))
    }

    fn output<'source, D: Driver<F = Fp>>(
        &self,
        _dr: &mut D,
        io: Self::IO<'source, D>,
        output: &mut D::IO,
    ) -> Result<(), Error> {
        output.push(io.wire)
    }
}

impl AccountDigestCircuit {
    /// Synthesize the proving path and check every constraint.
    ///
    /// Returns the public inputs.
    pub fn prove(&self, account: &ZkappAccount) -> Result<Vec<Fp>, Error> {
        let mut dr = ProvingDriver::<Fp>::new();
        let mut sink = CollectingSink::new();
        let digest = self.synthesize_prove(&mut dr, Always(account), &mut sink)?;
        dr.check_constraints()?;
        tracing::debug!(
            mul = dr.num_mul(),
            linear = dr.num_linear(),
            digest = ?digest.take(),
            "account digest circuit satisfied"
        );
        Ok(sink.into_inputs())
    }

    /// Public inputs a verifier derives from the expected digest.
    pub fn public_inputs(&self, digest: Fp) -> Result<Vec<Fp>, Error> {
        let mut dr = ProvingDriver::<Fp>::new();
        let mut sink = CollectingSink::new();
        self.synthesize_verify(&mut dr, Always(digest), &mut sink)?;
        Ok(sink.into_inputs())
    }

    /// Size of the proving path, measured without a witness.
    pub fn stats(&self) -> Result<(CircuitStats, usize), Error> {
        let mut dr = CountingDriver::<Fp>::new();
        let mut sink = CountingSink::new();
        self.synthesize_prove(&mut dr, Empty::new(), &mut sink)?;
        Ok((dr.stats(), sink.count))
    }
}
