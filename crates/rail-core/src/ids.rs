//! Strongly typed, zero-cost identifier wrappers.
//!
//! A loaded constituent is addressed by its [`AgentId`] for its whole life:
//! track cells, queue entries, and reporter registrations all hold ids, never
//! references.  Ids are allocated monotonically by the store and never reused
//! within a simulation, so a stale id simply fails to resolve instead of
//! aliasing a newer occupant.

use std::fmt;

/// Identity of a loaded simulation constituent (particle, composite, event).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u64);

impl AgentId {
    /// Sentinel meaning "no valid ID".
    pub const INVALID: AgentId = AgentId(u64::MAX);
}

impl Default for AgentId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
