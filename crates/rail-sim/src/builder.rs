//! Fluent builder for constructing a [`Simulation`].

use rail_core::{KindTable, REPORT_OFFSET, SimRng};
use rail_queue::{OrderedQueue, Payload};
use rail_track::Track;

use crate::collider::Collider;
use crate::particle::Particle;
use crate::reporter::Reporter;
use crate::store::AgentStore;
use crate::{SimError, SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                     |
/// |--------------------|---------------------------------------------|
/// | `.collider(c)`     | Empty registry (no collision rules)         |
/// | `.report_every(dt)`| Event-based reporting                       |
/// | `.mark_ends()`     | Off — no track-end sentinels                |
/// | `.seed(s)`         | Entropy-seeded RNG (non-reproducible)       |
///
/// # Example
///
/// ```rust,ignore
/// let mut collider = Collider::new();
/// collider.register(kind::WALKER, kind::PARTICLE, collisions::reflect);
///
/// let mut sim = Simulation::builder(100)
///     .collider(collider)
///     .mark_ends()
///     .seed(42)
///     .build()?;
/// for _ in 0..10 {
///     sim.load(Particle::walker(1.0))?;
/// }
/// sim.run(50.0)?;
/// ```
pub struct SimBuilder {
    length: usize,
    collider: Option<Collider>,
    report_every: Option<f64>,
    mark_ends: bool,
    seed: Option<u64>,
}

impl SimBuilder {
    /// Build a simulation over a track of `length` cells.
    pub fn new(length: usize) -> Self {
        SimBuilder {
            length,
            collider: None,
            report_every: None,
            mark_ends: false,
            seed: None,
        }
    }

    /// Supply the collision registry.
    pub fn collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Report at a fixed interval instead of after every event.
    pub fn report_every(mut self, dt: f64) -> Self {
        self.report_every = Some(dt);
        self
    }

    /// Load track-end sentinels at cells `0` and `length − 1`.
    pub fn mark_ends(mut self) -> Self {
        self.mark_ends = true;
        self
    }

    /// Seed the simulation RNG for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate inputs and return a ready simulation at time zero.
    pub fn build(self) -> SimResult<Simulation> {
        if self.length == 0 {
            return Err(SimError::BadArgument("track length must be at least 1".into()));
        }
        if let Some(dt) = self.report_every {
            if !(dt > 0.0) || !dt.is_finite() {
                return Err(SimError::BadArgument(format!(
                    "report interval must be positive and finite, got {dt}"
                )));
            }
        }

        let reporter = match self.report_every {
            None => Reporter::event_based(),
            Some(dt) => Reporter::interval(dt),
        };
        let rng = match self.seed {
            Some(seed) => SimRng::seeded(seed),
            None => SimRng::from_entropy(),
        };

        let mut sim = Simulation {
            time: 0.0,
            track: Track::new(self.length),
            queue: OrderedQueue::new(),
            collider: self.collider.unwrap_or_default(),
            kinds: KindTable::new(),
            reporter,
            rng,
            agents: AgentStore::new(),
        };

        if !sim.reporter.is_event_based() {
            // The interval reporter is a queue citizen from the start.
            sim.queue.insert(REPORT_OFFSET, Payload::Reporter);
        }
        if self.mark_ends {
            sim.load(Particle::track_end(0))?;
            sim.load(Particle::track_end(self.length as i64 - 1))?;
        }
        Ok(sim)
    }
}
