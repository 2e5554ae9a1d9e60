//! The collision registry and its dispatch rules.
//!
//! # Multi-match dispatch
//!
//! Rules are keyed on *pairs of kinds* and matched through the subtype
//! lattice: when a "polymerase" walker meets a "CTCF" boundary, every
//! registered rule whose pair the two kinds satisfy fires — the
//! polymerase↔CTCF rule *and* the generic walker↔boundary rule, if both
//! exist.  Concrete systems rely on this to layer generic reflex behavior
//! under specific refinements.
//!
//! # Argument order
//!
//! `register(a, b, rule)` guarantees the rule is always called with the
//! instance matching `a` first, regardless of which side of a collision it
//! appears on: registration also stores a swapped entry for `(b, a)`.  When
//! `a == b` the rule fires twice per collision, once per argument order —
//! that is what lets one walker's forward check flip *both* parties of a
//! head-on encounter in a single barrier.
//!
//! # The barrier
//!
//! Matching rules do not mutate anything; they return [`Action`]s, which
//! accumulate on the collider's pending list.  The simulation drains that
//! list FIFO once all neighbors of the updating agent have been observed
//! (see [`Simulation::check_collisions`][crate::Simulation::check_collisions]),
//! so no rule ever observes another rule's effects within the same tick.

use std::rc::Rc;

use rail_core::{AgentId, Kind};

use crate::{Action, Simulation};

/// The callable form of a collision rule.
///
/// Pure: observe `(first, second)` through the simulation and return the
/// actions to take.  The first argument always matches the first registered
/// kind.
pub type CollisionRule = dyn Fn(&Simulation, AgentId, AgentId) -> Vec<Action>;

pub(crate) struct RuleEntry {
    pub first: Kind,
    pub second: Kind,
    pub rule: Rc<CollisionRule>,
    /// Entry was generated by symmetrization: call with swapped arguments.
    pub swapped: bool,
}

/// Registry of collision rules plus the pending-action barrier.
#[derive(Default)]
pub struct Collider {
    pub(crate) entries: Vec<RuleEntry>,
    pub(crate) pending: Vec<Action>,
}

impl Collider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` for collisions between `first` and `second` kinds.
    ///
    /// Either side may be a single kind or a slice of kinds; slices expand to
    /// their Cartesian product.  To register several rules for one pair at
    /// once, [`fuse`] them first.
    pub fn register(
        &mut self,
        first: impl IntoKinds,
        second: impl IntoKinds,
        rule: impl Fn(&Simulation, AgentId, AgentId) -> Vec<Action> + 'static,
    ) {
        self.register_shared(first.into_kinds(), second.into_kinds(), Rc::new(rule));
    }

    /// [`Collider::register`] for an already-shared rule.
    pub fn register_shared(
        &mut self,
        firsts: Vec<Kind>,
        seconds: Vec<Kind>,
        rule: Rc<CollisionRule>,
    ) {
        for &a in &firsts {
            for &b in &seconds {
                self.entries.push(RuleEntry {
                    first: a,
                    second: b,
                    rule: Rc::clone(&rule),
                    swapped: false,
                });
                if a != b {
                    self.entries.push(RuleEntry {
                        first: b,
                        second: a,
                        rule: Rc::clone(&rule),
                        swapped: true,
                    });
                }
            }
        }
    }

    /// Number of registered entries (symmetrized entries included).
    pub fn rule_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of actions currently awaiting the barrier.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Fuse a list of rules into one whose action list is their concatenation.
pub fn fuse(rules: Vec<Rc<CollisionRule>>) -> Rc<CollisionRule> {
    Rc::new(move |sim, a, b| rules.iter().flat_map(|rule| rule(sim, a, b)).collect())
}

// ── IntoKinds ─────────────────────────────────────────────────────────────────

/// Conversion accepted by [`Collider::register`]: one kind or several.
pub trait IntoKinds {
    fn into_kinds(self) -> Vec<Kind>;
}

impl IntoKinds for Kind {
    fn into_kinds(self) -> Vec<Kind> {
        vec![self]
    }
}

impl IntoKinds for &[Kind] {
    fn into_kinds(self) -> Vec<Kind> {
        self.to_vec()
    }
}

impl<const N: usize> IntoKinds for [Kind; N] {
    fn into_kinds(self) -> Vec<Kind> {
        self.to_vec()
    }
}

impl IntoKinds for Vec<Kind> {
    fn into_kinds(self) -> Vec<Kind> {
        self
    }
}
