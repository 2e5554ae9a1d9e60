//! `rail-queue` — the time-ordered update queue driving a railsim run.
//!
//! # Why a sorted list
//!
//! The queue holds one entry per scheduled updateable — for typical tracks a
//! few dozen entries.  A sorted `VecDeque` gives O(1) pop, trivially correct
//! FIFO ordering among equal times, and O(n) identity removal, all of which
//! the engine relies on.  A binary heap would need lazy-deletion bookkeeping
//! to support [`OrderedQueue::remove_payload`] and buys nothing at this size.

pub mod error;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{QueueError, QueueResult};
pub use queue::{OrderedQueue, Payload, QueueEntry};
