//! Events in the circuit.

use pasta_curves::Fp;
use zkapp_poseidon::{gadget, prefixes};
use zkapp_synth::{Driver, Error, Maybe, MaybeKind, WireValue, Witness};

use crate::event::Event;

/// An event whose fields are individual wires.
pub struct EventVar<D: Driver<F = Fp>> {
    pub fields: Vec<WireValue<D>>,
}

impl<D: Driver<F = Fp>> Clone for EventVar<D> {
    fn clone(&self) -> Self {
        EventVar {
            fields: self.fields.clone(),
        }
    }
}

impl<D: Driver<F = Fp>> EventVar<D> {
    /// Allocate an event of `len` fields. The length is part of the circuit
    /// shape; a witness of any other length is rejected.
    pub fn alloc(dr: &mut D, len: usize, event: &Witness<D, Event>) -> Result<Self, Error> {
        if D::has_witness() && event.snag().len() != len {
            return Err(Error::MalformedWitness {
                message: "event length differs from the allocated shape",
            });
        }
        let fields = (0..len)
            .map(|i| WireValue::alloc(dr, D::just(|| event.snag().fields()[i])))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EventVar { fields })
    }

    /// An event fixed at synthesis time.
    pub fn constant(dr: &mut D, event: &Event) -> Result<Self, Error> {
        let fields = event
            .fields()
            .iter()
            .map(|x| WireValue::constant(dr, *x))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EventVar { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The prover's value of this event.
    pub fn value(&self) -> Witness<D, Event> {
        D::just(|| Event::new(self.fields.iter().map(|f| *f.value.snag()).collect()))
    }

    /// In-circuit [`Event::hash`].
    pub fn hash(&self, dr: &mut D) -> Result<WireValue<D>, Error> {
        gadget::hash(dr, prefixes::ZKAPP_EVENT, &self.fields)
    }
}

/// An event carried as its hash, with the event itself as prover-only data.
///
/// The hash wire is not bound to the data until [`EventHashVar::open`].
pub struct EventHashVar<D: Driver<F = Fp>> {
    pub hash: WireValue<D>,
    pub event: Witness<D, Event>,
}

impl<D: Driver<F = Fp>> Clone for EventHashVar<D> {
    fn clone(&self) -> Self {
        EventHashVar {
            hash: self.hash.clone(),
            event: D::MaybeKind::clone_rebind(&self.event),
        }
    }
}

impl<D: Driver<F = Fp>> EventHashVar<D> {
    /// Witness an event's hash.
    pub fn alloc(dr: &mut D, event: Witness<D, Event>) -> Result<Self, Error> {
        let hash = WireValue::alloc(dr, D::just(|| event.snag().hash()))?;
        Ok(EventHashVar { hash, event })
    }

    /// Allocate the event's fields and constrain them to hash to `self.hash`.
    pub fn open(&self, dr: &mut D, len: usize) -> Result<EventVar<D>, Error> {
        let event = EventVar::alloc(dr, len, &self.event)?;
        let recomputed = event.hash(dr)?;
        WireValue::enforce_equal(dr, &recomputed, &self.hash)?;
        Ok(event)
    }
}
