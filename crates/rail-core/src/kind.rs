//! Agent-kind tags and the subtype lattice over them.
//!
//! # Design
//!
//! Collision rules are keyed on *kinds*, not concrete types: a rule
//! registered for `(WALKER, BOUNDARY)` must also fire for a domain-specific
//! "polymerase" walker meeting a "CTCF" boundary.  Rather than leaning on
//! language-level inheritance, the lattice is explicit data: every kind is an
//! interned tag with zero or more parent tags, and [`KindTable::is_a`] walks
//! the parent links transitively.
//!
//! The table pre-registers the engine's base kinds.  Domain code adds its own
//! with [`KindTable::register`], naming any existing kinds as parents:
//!
//! ```
//! use rail_core::kind::{KindTable, WALKER};
//!
//! let mut kinds = KindTable::new();
//! let polymerase = kinds.register("polymerase", &[WALKER]);
//! assert!(kinds.is_a(polymerase, WALKER));
//! ```

use std::fmt;

/// An interned agent-kind tag.
///
/// Cheap to copy and compare; resolves to a name and parent set through the
/// [`KindTable`] that issued it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kind(pub u16);

// ── Built-in kinds ────────────────────────────────────────────────────────────
//
// Indices must match the registration order in `KindTable::new`.

/// Root kind of everything that lives on the track.
pub const PARTICLE: Kind = Kind(0);
/// A stationary particle.
pub const BOUNDARY: Kind = Kind(1);
/// The sentinel marking the ends of the track; a boundary.
pub const TRACK_END: Kind = Kind(2);
/// A particle that takes steps in a persistent direction.
pub const WALKER: Kind = Kind(3);
/// A walker that occasionally steps against its orientation.
pub const RANDOM_WALKER: Kind = Kind(4);
/// A multi-head bundle; lives off the track, its heads are particles.
pub const COMPOSITE: Kind = Kind(5);

// ── KindTable ─────────────────────────────────────────────────────────────────

struct KindEntry {
    name: String,
    parents: Vec<Kind>,
}

/// Registry of agent kinds and their subtype relation.
///
/// Owned by the simulation; collision dispatch consults it on every match
/// attempt, so `is_a` is kept allocation-free.
pub struct KindTable {
    entries: Vec<KindEntry>,
}

impl KindTable {
    /// A table holding the engine's base kinds.
    pub fn new() -> Self {
        let mut table = KindTable { entries: Vec::new() };
        table.register("particle", &[]);
        table.register("boundary", &[PARTICLE]);
        table.register("track-end", &[BOUNDARY]);
        table.register("walker", &[PARTICLE]);
        table.register("random-walker", &[WALKER]);
        table.register("composite", &[]);
        table
    }

    /// Intern a new kind with the given parent kinds.
    ///
    /// The name is for display and report inspection only; identity is the
    /// returned tag.  Registering the same name twice creates two distinct
    /// kinds.
    pub fn register(&mut self, name: &str, parents: &[Kind]) -> Kind {
        let tag = Kind(self.entries.len() as u16);
        self.entries.push(KindEntry {
            name: name.to_owned(),
            parents: parents.to_vec(),
        });
        tag
    }

    /// Whether `sub` is `sup` or a (transitive) subtype of it.
    ///
    /// Unknown tags are related to nothing but themselves.
    pub fn is_a(&self, sub: Kind, sup: Kind) -> bool {
        if sub == sup {
            return true;
        }
        match self.entries.get(sub.0 as usize) {
            None => false,
            Some(entry) => entry.parents.iter().any(|&p| self.is_a(p, sup)),
        }
    }

    /// The display name a kind was registered with.
    pub fn name(&self, kind: Kind) -> &str {
        self.entries
            .get(kind.0 as usize)
            .map_or("<unknown>", |e| e.name.as_str())
    }

    /// Number of registered kinds (built-ins included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}
