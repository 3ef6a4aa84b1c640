// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Events: named-event listener registries with ancestor bubbling.
//!
//! This crate is the observer kernel used by the Strata state model. It does
//! not know anything about layers or trees; it only provides the bookkeeping
//! for *per-node* listener registries and the propagation step that lets an
//! event fired at one node be observed at every ancestor registry.
//!
//! The design is an explicit parent-aware publish step rather than an
//! event-emitter base class:
//!
//! - Every observable node owns a [`Registry`].
//! - An event is wrapped in an [`Envelope`] carrying a sequence number drawn
//!   from a shared [`EventSequence`].
//! - Dispatch walks the origin-to-root registry path (provided by the caller,
//!   who knows the tree shape) and calls [`Registry::notify`] on each.
//!
//! ## Ordering
//!
//! Listeners registered for the same event kind are invoked in registration
//! order. Registries on the path are notified origin first, root last, and a
//! single envelope is fully propagated before the next one is produced.
//!
//! ## Replay suppression
//!
//! Sequence numbers are strictly increasing, and every registry remembers the
//! highest sequence it has seen. Re-delivering an envelope that already went
//! through a registry (for example by calling a public `dispatch` entry point
//! with a stored event) is silently ignored. This keeps "bubble to every
//! ancestor" idempotent without tracking per-event state.
//!
//! ## Reentrancy
//!
//! Listeners receive a shared reference to the event and run synchronously,
//! during the mutation that produced it. A listener must not re-enter the
//! state engine it observes; callers uphold this by construction (the engine
//! is exclusively borrowed while listeners run).

use core::fmt;

/// Classifies events into named kinds a listener can subscribe to.
///
/// `Kind` is typically a small fieldless enum mirroring the dotted event
/// names of the wire protocol (`layer.visibility.changed`, …).
pub trait BusEvent {
    /// The subscription key type.
    type Kind: Copy + Eq + fmt::Debug;

    /// The kind of this particular event.
    fn kind(&self) -> Self::Kind;
}

/// Monotonic source of envelope sequence numbers.
///
/// One sequence is shared per observable structure (for example per tree) so
/// that "already seen" comparisons are meaningful across all its registries.
#[derive(Debug, Default)]
pub struct EventSequence(u64);

impl EventSequence {
    /// Creates a sequence starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns the next sequence number. Never returns zero.
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// An event stamped with its dispatch sequence number.
#[derive(Debug, Clone)]
pub struct Envelope<E> {
    seq: u64,
    event: E,
}

impl<E> Envelope<E> {
    /// Wraps `event` with a fresh sequence number from `seq`.
    pub fn stamp(seq: &mut EventSequence, event: E) -> Self {
        Self {
            seq: seq.next(),
            event,
        }
    }

    /// The sequence number assigned at creation.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// The wrapped event.
    pub const fn event(&self) -> &E {
        &self.event
    }

    /// Unwraps the event.
    pub fn into_event(self) -> E {
        self.event
    }
}

/// Handle to a registered listener, used for removal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry<E: BusEvent> {
    id: ListenerId,
    kind: E::Kind,
    callback: Box<dyn FnMut(&E)>,
}

/// A per-node listener registry.
///
/// Listeners subscribe to a single event kind and are invoked in registration
/// order. The registry also tracks the highest envelope sequence it has seen,
/// so replays of already-delivered envelopes are ignored.
pub struct Registry<E: BusEvent> {
    entries: Vec<Entry<E>>,
    next_listener: u64,
    last_seen: u64,
}

impl<E: BusEvent> Registry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_listener: 0,
            last_seen: 0,
        }
    }

    /// Registers `callback` for events of `kind`.
    pub fn add_listener(
        &mut self,
        kind: E::Kind,
        callback: Box<dyn FnMut(&E)>,
    ) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.entries.push(Entry { id, kind, callback });
        id
    }

    /// Removes a previously registered listener.
    ///
    /// Returns `false` when the id is unknown (for example already removed).
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Number of registered listeners, across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `envelope` to the matching listeners, in registration order.
    ///
    /// Returns `false` when the envelope was already seen here and therefore
    /// suppressed.
    pub fn notify(&mut self, envelope: &Envelope<E>) -> bool {
        if envelope.seq <= self.last_seen {
            return false;
        }
        self.last_seen = envelope.seq;
        let kind = envelope.event.kind();
        for entry in &mut self.entries {
            if entry.kind == kind {
                (entry.callback)(&envelope.event);
            }
        }
        true
    }
}

impl<E: BusEvent> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("listeners", &self.entries.len())
            .field("last_seen", &self.last_seen)
            .finish()
    }
}

/// Propagates one envelope along an origin-to-root registry path.
///
/// Each registry on the path is notified in turn; registries that already saw
/// the envelope are skipped by [`Registry::notify`].
pub fn dispatch_along<'a, E, I>(path: I, envelope: &Envelope<E>)
where
    E: BusEvent + 'a,
    I: IntoIterator<Item = &'a mut Registry<E>>,
{
    for registry in path {
        registry.notify(envelope);
    }
}
