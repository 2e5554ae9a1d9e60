//! The ordered queue and its entry types.

use std::collections::VecDeque;

use rail_core::{AgentId, Time};

use crate::{QueueError, QueueResult};

// ── Payload ───────────────────────────────────────────────────────────────────

/// What a queue entry schedules.
///
/// Almost everything is an agent-store constituent addressed by id; the
/// interval reporter is the one updateable owned directly by the simulation,
/// so it gets its own variant instead of a store slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// A constituent in the agent store (particle, composite, or event).
    Agent(AgentId),
    /// The simulation's interval reporter.
    Reporter,
}

/// One scheduled wake-up: an absolute time and the payload to update then.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct QueueEntry {
    pub time: Time,
    pub payload: Payload,
}

// ── OrderedQueue ──────────────────────────────────────────────────────────────

/// A queue of wake-ups ordered by absolute simulation time.
///
/// Entries with identical times pop in insertion order.  Under floating-point
/// arithmetic two conceptually simultaneous events may carry times a few ulps
/// apart and pop in a non-obvious order; that is a documented property of the
/// engine, not a bug — disambiguate deliberate ties with small offsets.
#[derive(Default)]
pub struct OrderedQueue {
    entries: VecDeque<QueueEntry>,
}

impl OrderedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` at absolute time `time`.
    ///
    /// The entry lands after every entry with time `<= time`, preserving FIFO
    /// order among equal times.
    pub fn insert(&mut self, time: Time, payload: Payload) {
        let at = self
            .entries
            .iter()
            .position(|e| e.time > time)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, QueueEntry { time, payload });
    }

    /// Remove and return the earliest entry.
    pub fn pop(&mut self) -> QueueResult<QueueEntry> {
        self.entries.pop_front().ok_or(QueueError::Empty)
    }

    /// The time of the earliest entry, if any.
    pub fn peek_time(&self) -> Option<Time> {
        self.entries.front().map(|e| e.time)
    }

    /// Remove the first entry scheduled at exactly `time`.
    ///
    /// Asking for a time that is not present is an error; use
    /// [`OrderedQueue::remove_range`] when absence is acceptable.
    pub fn remove_at(&mut self, time: Time) -> QueueResult<QueueEntry> {
        let at = self
            .entries
            .iter()
            .position(|e| e.time == time)
            .ok_or_else(|| QueueError::NotFound(format!("time {time}")))?;
        self.entries
            .remove(at)
            .ok_or_else(|| QueueError::NotFound(format!("time {time}")))
    }

    /// Remove every entry with time in `lo <= t < hi`.
    ///
    /// An empty interval is considered deliberate and removes nothing.
    pub fn remove_range(&mut self, lo: Time, hi: Time) {
        self.entries.retain(|e| e.time < lo || e.time >= hi);
    }

    /// Remove the first entry carrying `payload`.
    pub fn remove_payload(&mut self, payload: Payload) -> QueueResult<QueueEntry> {
        let at = self
            .entries
            .iter()
            .position(|e| e.payload == payload)
            .ok_or_else(|| QueueError::NotFound(format!("payload {payload:?}")))?;
        self.entries
            .remove(at)
            .ok_or_else(|| QueueError::NotFound(format!("payload {payload:?}")))
    }

    /// Remove every entry carrying `payload`; returns how many were dropped.
    ///
    /// This is the cleanup path: absence is fine, so repeated unloads stay
    /// idempotent.
    pub fn purge_payload(&mut self, payload: Payload) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.payload != payload);
        before - self.entries.len()
    }

    /// Shift every entry's time by `dt`.  O(n); not used by the main loop.
    pub fn shift_times(&mut self, dt: Time) {
        for entry in &mut self.entries {
            entry.time += dt;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in pop order.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    /// Whether any entry carries `payload`.
    pub fn contains_payload(&self, payload: Payload) -> bool {
        self.entries.iter().any(|e| e.payload == payload)
    }
}
