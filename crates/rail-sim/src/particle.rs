//! On-track agents: stationary boundaries and stepping walkers.
//!
//! A [`Particle`] is one entity occupying one track cell.  Its capabilities
//! are structural: a particle with [`Motion`] walks, one with [`Life`]
//! expires, one with neither just sits on the track (which is exactly what a
//! boundary needs).  Behavior that varies per domain — when a step is allowed,
//! what a collision does — is carried as plain function values (the stepping
//! rule here, collision rules in the collider), not as subtypes.

use rail_core::kind::{self, Kind};
use rail_core::{AgentId, Direction, Time};

use crate::action::DeferredFn;
use crate::stepping::{self, SteppingRule};
use crate::{SimResult, Simulation};

// ── Life ──────────────────────────────────────────────────────────────────────

/// A lifetime countdown mixed into any constituent.
///
/// The owner's update decrements `remaining` by the elapsed time; once it is
/// due the owner enqueues its own unload event.  The optional expiry hook
/// runs (as an immediate event) after the unload — domain code uses it to
/// respawn a replacement.
pub struct Life {
    /// Time left until expiry.
    pub remaining: f64,
    pub(crate) on_expire: Option<DeferredFn>,
}

impl Life {
    pub fn new(remaining: f64) -> Life {
        Life {
            remaining,
            on_expire: None,
        }
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// The walking state of a particle.
pub struct Motion {
    /// Persistent orientation.  `None` until load, which draws a random
    /// direction for walkers that did not specify one.
    pub direction: Option<Direction>,
    /// Current walking speed (steps per unit time).
    pub speed: f64,
    /// The speed the walker returns to when nothing slows it down.
    pub free_speed: f64,
    /// Reset `speed` to `free_speed` at the start of every update, so a
    /// slowdown imposed by a collision only lasts while the blocker is there.
    pub recover_speed: bool,
    /// Countdown to the next step attempt.
    pub until_step: f64,
    /// `Some(p)` makes this a random walker: each step goes against the
    /// persistent direction with probability `1 − p`.
    pub p_forward: Option<f64>,
    /// Decides whether and how a step happens.
    pub rule: SteppingRule,
}

impl Motion {
    fn new(speed: f64) -> Motion {
        Motion {
            direction: None,
            speed,
            free_speed: speed,
            recover_speed: false,
            until_step: 1.0 / speed,
            p_forward: None,
            rule: stepping::careful,
        }
    }

    /// The persistent orientation.  Resolved during load; before that this
    /// falls back to forward.
    #[inline]
    pub fn heading(&self) -> Direction {
        self.direction.unwrap_or(Direction::Fwd)
    }
}

// ── Particle ──────────────────────────────────────────────────────────────────

/// An agent living on the track.
pub struct Particle {
    /// Tag used by collision dispatch and report grouping.
    pub kind: Kind,
    /// Track position.  `None` until load, which picks a random empty cell.
    pub position: Option<i64>,
    pub motion: Option<Motion>,
    pub life: Option<Life>,
    /// The composite this particle is a head of, if any.
    pub parent: Option<AgentId>,
    pub(crate) last_update: Time,
}

impl Particle {
    fn bare(kind: Kind) -> Particle {
        Particle {
            kind,
            position: None,
            motion: None,
            life: None,
            parent: None,
            last_update: 0.0,
        }
    }

    /// A stationary particle at `position`.
    pub fn boundary(position: i64) -> Particle {
        Particle::bare(kind::BOUNDARY).at(position)
    }

    /// The sentinel marking a track end.  Loaded at cells `0` and `L − 1` by
    /// [`SimBuilder::mark_ends`][crate::SimBuilder::mark_ends].
    pub fn track_end(position: i64) -> Particle {
        Particle::bare(kind::TRACK_END).at(position)
    }

    /// A walker taking `speed` steps per unit time.
    ///
    /// Position and direction are drawn at load time unless set with
    /// [`Particle::at`] / [`Particle::heading`]; the default stepping rule is
    /// [`stepping::careful`].
    pub fn walker(speed: f64) -> Particle {
        let mut p = Particle::bare(kind::WALKER);
        p.motion = Some(Motion::new(speed));
        p
    }

    /// A walker that steps against its orientation with probability
    /// `1 − p_forward`.
    pub fn random_walker(speed: f64, p_forward: f64) -> Particle {
        let mut p = Particle::bare(kind::RANDOM_WALKER);
        let mut motion = Motion::new(speed);
        motion.p_forward = Some(p_forward);
        p.motion = Some(motion);
        p
    }

    // ── Builder-style configuration ───────────────────────────────────────

    /// Load at this position instead of a random empty cell.
    pub fn at(mut self, position: i64) -> Particle {
        self.position = Some(position);
        self
    }

    /// Fix the initial orientation instead of drawing one at load.
    pub fn heading(mut self, direction: Direction) -> Particle {
        if let Some(motion) = self.motion.as_mut() {
            motion.direction = Some(direction);
        }
        self
    }

    /// Substitute the stepping rule.
    pub fn with_rule(mut self, rule: SteppingRule) -> Particle {
        if let Some(motion) = self.motion.as_mut() {
            motion.rule = rule;
        }
        self
    }

    /// Tag with a domain-specific kind (registered on the simulation's
    /// [`KindTable`][rail_core::KindTable]).
    pub fn with_kind(mut self, kind: Kind) -> Particle {
        self.kind = kind;
        self
    }

    /// Expire (enqueue an unload) after `lifetime` time units.
    pub fn with_lifetime(mut self, lifetime: f64) -> Particle {
        self.life = Some(Life::new(lifetime));
        self
    }

    /// Run `f` after this particle is unloaded by lifetime expiry.
    pub fn on_expire(mut self, f: impl FnOnce(&mut Simulation) -> SimResult<()> + 'static) -> Particle {
        let life = self.life.get_or_insert_with(|| Life::new(f64::INFINITY));
        life.on_expire = Some(Box::new(f));
        self
    }

    /// Recover `free_speed` at every update (see [`Motion::recover_speed`]).
    pub fn with_recovering_speed(mut self) -> Particle {
        if let Some(motion) = self.motion.as_mut() {
            motion.recover_speed = true;
        }
        self
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Relative time until this particle next needs a wake-up: the sooner of
    /// its step countdown and its lifetime.  Infinity for a plain boundary.
    pub fn next_update(&self) -> f64 {
        let step = self.motion.as_ref().map_or(f64::INFINITY, |m| m.until_step);
        let life = self.life.as_ref().map_or(f64::INFINITY, |l| l.remaining);
        step.min(life)
    }

    pub fn is_walker(&self) -> bool {
        self.motion.is_some()
    }
}
