//! Multi-head composites.
//!
//! A composite is a bundle of particles ("heads") acting as one agent for
//! loading, reporting, and lifetime purposes.  The composite itself never
//! appears on the track — its heads are full particles with their own cells,
//! updates, and collisions.  Only the composite reports, as a tuple of head
//! positions; its heads are unregistered from the reporter at load.
//!
//! The composite's own update handles nothing but its lifetime; stepping is
//! the heads' business.  That split is what lets a lifetime be mixed into a
//! bundle without double-scheduling anybody: exactly one queue entry per
//! constituent, each re-queued by its own update.

use rail_core::kind::{self, Kind};
use rail_core::{AgentId, Time};

use crate::particle::{Life, Particle};
use crate::{SimResult, Simulation};

/// A loadable, reportable bundle of head particles.
pub struct Composite {
    /// Tag used for report grouping (and collision dispatch, though a
    /// composite itself never sits in a track cell).
    pub kind: Kind,
    /// Heads waiting to be loaded; drained by the composite's load body.
    pub(crate) pending_heads: Vec<Particle>,
    /// Ids of the loaded heads, in construction order.
    pub heads: Vec<AgentId>,
    pub life: Option<Life>,
    pub(crate) last_update: Time,
}

impl Composite {
    /// A composite over the given heads, tagged [`kind::COMPOSITE`].
    pub fn new(heads: Vec<Particle>) -> Composite {
        Composite {
            kind: kind::COMPOSITE,
            pending_heads: heads,
            heads: Vec::new(),
            life: None,
            last_update: 0.0,
        }
    }

    /// Tag with a domain-specific kind.
    pub fn with_kind(mut self, kind: Kind) -> Composite {
        self.kind = kind;
        self
    }

    /// Expire (unload the whole bundle) after `lifetime` time units.
    pub fn with_lifetime(mut self, lifetime: f64) -> Composite {
        self.life = Some(Life::new(lifetime));
        self
    }

    /// Run `f` after this composite is unloaded by lifetime expiry — the
    /// hook domain code uses to respawn a replacement.
    pub fn on_expire(
        mut self,
        f: impl FnOnce(&mut Simulation) -> SimResult<()> + 'static,
    ) -> Composite {
        let life = self.life.get_or_insert_with(|| Life::new(f64::INFINITY));
        life.on_expire = Some(Box::new(f));
        self
    }

    /// Relative time until the composite needs a wake-up: its remaining
    /// lifetime, or never.
    pub fn next_update(&self) -> f64 {
        self.life.as_ref().map_or(f64::INFINITY, |l| l.remaining)
    }
}
