//! zkApp events.

use pasta_curves::Fp;
use serde::{Deserialize, Serialize};
use zkapp_poseidon::{hash, prefixes};

/// One emitted event: an ordered list of field elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(#[serde(with = "crate::field::fp_vec")] pub Vec<Fp>);

impl Event {
    pub fn new(fields: Vec<Fp>) -> Self {
        Event(fields)
    }

    pub fn fields(&self) -> &[Fp] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hash under the event prefix.
    pub fn hash(&self) -> Fp {
        hash(prefixes::ZKAPP_EVENT, &self.0)
    }
}

impl From<Vec<Fp>> for Event {
    fn from(fields: Vec<Fp>) -> Self {
        Event(fields)
    }
}

impl<const N: usize> From<[u64; N]> for Event {
    fn from(values: [u64; N]) -> Self {
        Event(values.iter().map(|v| Fp::from(*v)).collect())
    }
}
