//! Events and actions logs in the circuit.
//!
//! Only the digest is a wire. The event list rides along as prover-only
//! data (top first), and every push or pop witnesses the digest on the other
//! side of the operation before constraining the push relation between the
//! two.

use std::marker::PhantomData;

use pasta_curves::Fp;
use zkapp_poseidon::gadget;
use zkapp_synth::{Driver, Maybe, MaybeKind, WireValue, Witness};

use crate::checked::event::{EventHashVar, EventVar};
use crate::error::{Result, ZkappError};
use crate::event::Event;
use crate::log::LogKind;

/// In-circuit log of kind `K`.
pub struct LogVar<D: Driver<F = Fp>, K: LogKind> {
    pub digest: WireValue<D>,
    /// Events, top first.
    pub events: Witness<D, Vec<Event>>,
    _kind: PhantomData<K>,
}

impl<D: Driver<F = Fp>, K: LogKind> Clone for LogVar<D, K> {
    fn clone(&self) -> Self {
        LogVar {
            digest: self.digest.clone(),
            events: D::MaybeKind::clone_rebind(&self.events),
            _kind: PhantomData,
        }
    }
}

fn push_relation<D: Driver<F = Fp>, K: LogKind>(
    dr: &mut D,
    below: &WireValue<D>,
    event_hash: &WireValue<D>,
) -> Result<WireValue<D>> {
    Ok(gadget::hash(
        dr,
        K::PUSH_PREFIX,
        &[below.clone(), event_hash.clone()],
    )?)
}

impl<D: Driver<F = Fp>, K: LogKind> LogVar<D, K> {
    /// The empty log, its digest a constant.
    pub fn empty(dr: &mut D) -> Result<Self> {
        Ok(LogVar {
            digest: WireValue::constant(dr, K::empty_digest())?,
            events: D::just(Vec::new),
            _kind: PhantomData,
        })
    }

    /// Witness a log from its events. The digest is computed by the prover
    /// and is only as trustworthy as whatever later constrains it.
    pub fn alloc(dr: &mut D, events: Witness<D, Vec<Event>>) -> Result<Self> {
        let digest = WireValue::alloc(dr, D::just(|| K::hash(events.snag())))?;
        Ok(LogVar {
            digest,
            events,
            _kind: PhantomData,
        })
    }

    /// Witness an arbitrary digest next to an arbitrary event list.
    pub fn from_parts(
        dr: &mut D,
        digest: Witness<D, Fp>,
        events: Witness<D, Vec<Event>>,
    ) -> Result<Self> {
        Ok(LogVar {
            digest: WireValue::alloc(dr, digest)?,
            events,
            _kind: PhantomData,
        })
    }

    pub fn digest(&self) -> &WireValue<D> {
        &self.digest
    }

    /// Push `event` on top.
    ///
    /// The new digest is witnessed from the new list, then constrained to
    /// `hash(push_prefix, [old_digest, hash(event)])`.
    pub fn push_checked(&self, dr: &mut D, event: &EventVar<D>) -> Result<Self> {
        let pushed = event.value();
        let events = D::just(|| {
            let mut events = Vec::with_capacity(self.events.snag().len() + 1);
            events.push(pushed.snag().clone());
            events.extend(self.events.snag().iter().cloned());
            events
        });
        let digest = WireValue::alloc(dr, D::just(|| K::hash(events.snag())))?;

        let event_hash = event.hash(dr)?;
        let expected = push_relation::<D, K>(dr, &self.digest, &event_hash)?;
        WireValue::enforce_equal(dr, &digest, &expected)?;

        Ok(LogVar {
            digest,
            events,
            _kind: PhantomData,
        })
    }

    /// Pop the top event.
    ///
    /// The head's hash and the tail's digest are witnessed, then the old
    /// digest is constrained to `hash(push_prefix, [tail_digest, head_hash])`.
    /// The head comes back as its hash; [`EventHashVar::open`] binds it to
    /// field wires when the caller needs them.
    pub fn pop_checked(&self, dr: &mut D) -> Result<(EventHashVar<D>, Self)> {
        if D::has_witness() && self.events.snag().is_empty() {
            tracing::warn!(log = K::NAME, "checked pop from an empty log");
            return Err(ZkappError::LogUnderflow);
        }
        let head = D::just(|| self.events.snag().first().cloned().unwrap_or_default());
        let tail = D::just(|| self.events.snag().get(1..).unwrap_or_default().to_vec());

        let head = EventHashVar::alloc(dr, head)?;
        let tail_digest = WireValue::alloc(dr, D::just(|| K::hash(tail.snag())))?;

        let expected = push_relation::<D, K>(dr, &tail_digest, &head.hash)?;
        WireValue::enforce_equal(dr, &self.digest, &expected)?;

        Ok((
            head,
            LogVar {
                digest: tail_digest,
                events: tail,
                _kind: PhantomData,
            },
        ))
    }
}
