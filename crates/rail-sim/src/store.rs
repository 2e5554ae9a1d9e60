//! The constituent store — everything currently loaded, keyed by id.
//!
//! Ids are allocated monotonically and never reused, so a queue entry or
//! track cell holding a stale id resolves to nothing instead of a newer
//! occupant.  Lookup and removal are O(1) over an `FxHashMap` (ids are small
//! integers; SipHash buys nothing here).

use rail_core::AgentId;
use rustc_hash::FxHashMap;

use crate::composite::Composite;
use crate::event::Event;
use crate::particle::Particle;

// ── Constituent ───────────────────────────────────────────────────────────────

/// Anything loadable into a simulation.
///
/// Capabilities are structural over the variants: all three are updateable
/// (the simulation dispatches on the variant), particles and composites are
/// reportable, events are not.
pub enum Constituent {
    Particle(Particle),
    Composite(Composite),
    Event(Event),
}

impl Constituent {
    /// Relative time until this constituent next needs a wake-up.
    pub fn next_update(&self) -> f64 {
        match self {
            Constituent::Particle(p) => p.next_update(),
            Constituent::Composite(c) => c.next_update(),
            Constituent::Event(e) => e.countdown,
        }
    }

    /// Absolute time of the most recent update (or load).
    pub fn last_update(&self) -> f64 {
        match self {
            Constituent::Particle(p) => p.last_update,
            Constituent::Composite(c) => c.last_update,
            Constituent::Event(e) => e.last_update,
        }
    }

    pub(crate) fn set_last_update(&mut self, time: f64) {
        match self {
            Constituent::Particle(p) => p.last_update = time,
            Constituent::Composite(c) => c.last_update = time,
            Constituent::Event(e) => e.last_update = time,
        }
    }

    /// Whether this constituent contributes snapshots to reports.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Constituent::Event(_))
    }

    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            Constituent::Particle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_particle_mut(&mut self) -> Option<&mut Particle> {
        match self {
            Constituent::Particle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Constituent::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_composite_mut(&mut self) -> Option<&mut Composite> {
        match self {
            Constituent::Composite(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Particle> for Constituent {
    fn from(p: Particle) -> Constituent {
        Constituent::Particle(p)
    }
}

impl From<Composite> for Constituent {
    fn from(c: Composite) -> Constituent {
        Constituent::Composite(c)
    }
}

impl From<Event> for Constituent {
    fn from(e: Event) -> Constituent {
        Constituent::Event(e)
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Owner of all loaded constituents.
#[derive(Default)]
pub struct AgentStore {
    map: FxHashMap<AgentId, Constituent>,
    next: u64,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, constituent: Constituent) -> AgentId {
        let id = AgentId(self.next);
        self.next += 1;
        self.map.insert(id, constituent);
        id
    }

    pub fn get(&self, id: AgentId) -> Option<&Constituent> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Constituent> {
        self.map.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: AgentId) -> Option<Constituent> {
        self.map.remove(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.map.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all loaded constituents (no particular order).
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Constituent)> {
        self.map.iter().map(|(&id, c)| (id, c))
    }
}
