//! Coalescing mailbox used for every signal between the matcher and its
//! callers.
//!
//! An [`EventBox`] holds at most one pending event per kind. Setting an event
//! whose kind is already pending replaces it, so a slow consumer only ever
//! sees the latest state instead of a backlog.

use crate::merger::Merger;
use indexmap::IndexMap;
use parking_lot::{Condvar, Mutex};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A payload that can be coalesced by kind.
pub trait Signal {
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}

/// Pending events in the order their kinds were last set.
pub type Events<E> = IndexMap<<E as Signal>::Kind, E>;

pub struct EventBox<E: Signal> {
    pending: Mutex<Events<E>>,
    ready: Condvar,
}

impl<E: Signal> Default for EventBox<E> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(IndexMap::new()),
            ready: Condvar::new(),
        }
    }
}

impl<E: Signal> EventBox<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `event`, replacing any pending event of the same kind.
    pub fn set(&self, event: E) {
        let kind = event.kind();
        let mut pending = self.pending.lock();
        // Re-inserting moves the kind to the back so iteration follows set order.
        pending.shift_remove(&kind);
        pending.insert(kind, event);
        self.ready.notify_all();
    }

    /// Blocks until at least one event is pending, then hands every pending
    /// event to `handler` and leaves the box empty.
    pub fn wait<R>(&self, handler: impl FnOnce(Events<E>) -> R) -> R {
        let mut pending = self.pending.lock();
        while pending.is_empty() {
            self.ready.wait(&mut pending);
        }
        let events = std::mem::take(&mut *pending);
        drop(pending);
        handler(events)
    }

    /// Like [`wait`](Self::wait), but gives up after `timeout`.
    pub fn wait_timeout<R>(
        &self,
        timeout: Duration,
        handler: impl FnOnce(Events<E>) -> R,
    ) -> Option<R> {
        let deadline = Instant::now() + timeout;
        let mut pending = self.pending.lock();
        while pending.is_empty() {
            if self.ready.wait_until(&mut pending, deadline).timed_out() {
                break;
            }
        }
        if pending.is_empty() {
            return None;
        }
        let events = std::mem::take(&mut *pending);
        drop(pending);
        Some(handler(events))
    }

    /// Returns true if an event of `kind` is pending, without consuming it.
    pub fn peek(&self, kind: E::Kind) -> bool {
        self.pending.lock().contains_key(&kind)
    }
}

/// Output of the matcher.
#[derive(Debug, Clone)]
pub enum Event {
    /// Fraction of chunks scanned so far, in `0.0..=1.0`.
    SearchProgress(f32),
    SearchFin(Arc<Merger>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SearchProgress,
    SearchFin,
}

impl Signal for Event {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            Event::SearchProgress(_) => EventKind::SearchProgress,
            Event::SearchFin(_) => EventKind::SearchFin,
        }
    }
}
