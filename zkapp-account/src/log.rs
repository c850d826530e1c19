//! Events and actions logs.
//!
//! A log is publicly just a digest. Pushing an event hashes the previous
//! digest with the event's hash under the log's push prefix, so the digest
//! of a list is a right fold from the empty digest: the first element of the
//! list is the most recent push.
//!
//! [`Events`] and [`Actions`] share the protocol and differ only in their
//! domain constants.

use std::marker::PhantomData;

use once_cell::sync::Lazy;
use pasta_curves::Fp;
use serde::{Deserialize, Serialize};
use zkapp_poseidon::{hash, prefixes, salt_digest, salts, HashPrefix, Salt};

use crate::error::{Result, ZkappError};
use crate::event::Event;

/// Domain constants of one log kind.
pub trait LogKind: 'static {
    /// Name used in logs.
    const NAME: &'static str;
    /// Salt phrase of the empty digest.
    const EMPTY_SALT: Salt;
    /// Prefix of the push hash.
    const PUSH_PREFIX: HashPrefix;

    /// Digest of the empty log.
    fn empty_digest() -> Fp;

    /// `hash(push_prefix, [digest, event.hash()])`
    fn push_event(digest: Fp, event: &Event) -> Fp {
        push_hash::<Self>(digest, event.hash())
    }

    /// Digest of a list, first element on top.
    fn hash(events: &[Event]) -> Fp {
        events
            .iter()
            .rev()
            .fold(Self::empty_digest(), |acc, e| Self::push_event(acc, e))
    }
}

/// Push an already-hashed event.
pub fn push_hash<K: LogKind + ?Sized>(digest: Fp, event_hash: Fp) -> Fp {
    hash(K::PUSH_PREFIX, &[digest, event_hash])
}

static EVENTS_EMPTY: Lazy<Fp> = Lazy::new(|| {
    tracing::debug!("computing empty events digest");
    salt_digest(salts::EVENTS_EMPTY)
});

static ACTIONS_EMPTY: Lazy<Fp> = Lazy::new(|| {
    tracing::debug!("computing empty actions digest");
    salt_digest(salts::ACTIONS_EMPTY)
});

static ACTION_STATE_EMPTY_ELT: Lazy<Fp> = Lazy::new(|| {
    tracing::debug!("computing empty action-state element");
    salt_digest(salts::ACTION_STATE_EMPTY_ELT)
});

/// Events emitted by an account update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Events;

impl LogKind for Events {
    const NAME: &'static str = "events";
    const EMPTY_SALT: Salt = salts::EVENTS_EMPTY;
    const PUSH_PREFIX: HashPrefix = prefixes::ZKAPP_EVENTS;

    fn empty_digest() -> Fp {
        *EVENTS_EMPTY
    }
}

/// Actions (sequence events) dispatched by an account update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actions;

impl LogKind for Actions {
    const NAME: &'static str = "actions";
    const EMPTY_SALT: Salt = salts::ACTIONS_EMPTY;
    const PUSH_PREFIX: HashPrefix = prefixes::ZKAPP_ACTIONS;

    fn empty_digest() -> Fp {
        *ACTIONS_EMPTY
    }
}

impl Actions {
    /// Fold a whole batch of actions into an action-state accumulator.
    pub fn push_events(acc: Fp, actions: &[Event]) -> Fp {
        push_hash::<Actions>(acc, Actions::hash(actions))
    }

    /// Initial value of every action-state slot.
    pub fn empty_state_element() -> Fp {
        *ACTION_STATE_EMPTY_ELT
    }
}

/// Wire form of a log: a claimed digest and top-first frames, each an event
/// with the digest below it. Nothing is checked until the parts are
/// assembled and popped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogParts {
    #[serde(with = "crate::field::fp_decimal")]
    pub digest: Fp,
    pub frames: Vec<LogFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFrame {
    pub event: Event,
    #[serde(with = "crate::field::fp_decimal")]
    pub below: Fp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    event: Event,
    below: Fp,
}

/// A log that keeps its events next to the digest.
///
/// Frames are stored bottom-first; every public view is top-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStack<K: LogKind> {
    frames: Vec<Frame>,
    digest: Fp,
    _kind: PhantomData<K>,
}

impl<K: LogKind> Default for LogStack<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LogKind> From<LogParts> for LogStack<K> {
    fn from(parts: LogParts) -> Self {
        let frames = parts
            .frames
            .into_iter()
            .map(|f| (f.event, f.below))
            .collect();
        Self::from_parts(parts.digest, frames)
    }
}

impl<K: LogKind> LogStack<K> {
    /// The empty log.
    pub fn new() -> Self {
        LogStack {
            frames: Vec::new(),
            digest: K::empty_digest(),
            _kind: PhantomData,
        }
    }

    /// Build from a top-first list.
    pub fn from_events(events: &[Event]) -> Self {
        let mut stack = Self::new();
        for event in events.iter().rev() {
            stack.push(event.clone());
        }
        stack
    }

    /// Assemble from a claimed digest and top-first `(event, digest_below)`
    /// frames without checking them. [`LogStack::pop`] verifies each frame
    /// as it is removed.
    pub fn from_parts(digest: Fp, frames: Vec<(Event, Fp)>) -> Self {
        LogStack {
            frames: frames
                .into_iter()
                .rev()
                .map(|(event, below)| Frame { event, below })
                .collect(),
            digest,
            _kind: PhantomData,
        }
    }

    pub fn digest(&self) -> Fp {
        self.digest
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Events, top first.
    pub fn events(&self) -> Vec<Event> {
        self.frames.iter().rev().map(|f| f.event.clone()).collect()
    }

    /// Push an event and return the new digest.
    pub fn push(&mut self, event: Event) -> Fp {
        let below = self.digest;
        self.digest = K::push_event(below, &event);
        self.frames.push(Frame { event, below });
        self.digest
    }

    /// Pop the top event and return it with the digest below it.
    ///
    /// The stack is left untouched on error.
    pub fn pop(&mut self) -> Result<(Event, Fp)> {
        let Some(frame) = self.frames.last() else {
            tracing::warn!(log = K::NAME, "pop from an empty log");
            return Err(ZkappError::LogUnderflow);
        };
        if K::push_event(frame.below, &frame.event) != self.digest {
            let depth = self.frames.len();
            tracing::warn!(log = K::NAME, depth, "log frame does not match its digest");
            return Err(ZkappError::DigestMismatch { depth });
        }
        let Frame { event, below } = self.frames.pop().ok_or(ZkappError::LogUnderflow)?;
        self.digest = below;
        Ok((event, below))
    }

    /// Pop every frame, then require the digest left behind to be the empty
    /// log's. Returns the events top first.
    pub fn unwind(mut self) -> Result<Vec<Event>> {
        let mut events = Vec::with_capacity(self.len());
        while !self.is_empty() {
            let (event, _) = self.pop()?;
            events.push(event);
        }
        if self.digest != K::empty_digest() {
            tracing::warn!(log = K::NAME, "log does not bottom out at the empty digest");
            return Err(ZkappError::DigestMismatch { depth: 0 });
        }
        Ok(events)
    }

    /// Wire form, top first.
    pub fn to_parts(&self) -> LogParts {
        LogParts {
            digest: self.digest,
            frames: self
                .frames
                .iter()
                .rev()
                .map(|f| LogFrame {
                    event: f.event.clone(),
                    below: f.below,
                })
                .collect(),
        }
    }

    /// Recompute the digest from the stored events and compare.
    pub fn is_consistent(&self) -> bool {
        K::hash(&self.events()) == self.digest
    }
}
