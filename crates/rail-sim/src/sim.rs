//! The `Simulation` struct and its main loop.
//!
//! # Update protocol
//!
//! The loop pops the earliest queue entry, advances absolute time to it, and
//! runs that payload's update.  Updates re-queue themselves if they want a
//! future wake-up; nothing is auto-scheduled.  A wake-up may come earlier
//! than the payload asked for, so handlers work from current state — every
//! countdown is decremented by the actually-elapsed time, never by the
//! expected interval.
//!
//! The simulation is the unique root of mutation: agents never store a
//! reference to it, they receive it as the context argument of their
//! handlers.  All work is cooperative and single-threaded; an update runs to
//! completion atomically with respect to simulation state.
//!
//! # Structural mutations
//!
//! Loading is immediate; unloading is deferred through an [`Event`] (see
//! [`Simulation::unload`]).  Unloading synchronously mid-update would leave
//! the popped entry's bookkeeping half-done, so [`Simulation::unload_now`]
//! must only be called from within an event's action.

use rail_core::{AgentId, Direction, Kind, KindTable, SimRng, Snapshot, Time, is_due};
use rail_queue::{OrderedQueue, Payload};
use rail_track::Track;

use crate::builder::SimBuilder;
use crate::collider::Collider;
use crate::composite::Composite;
use crate::event::Event;
use crate::particle::{Life, Motion, Particle};
use crate::reporter::{Report, ReportMode, Reporter};
use crate::store::{AgentStore, Constituent};
use crate::{Action, SimError, SimResult};

/// Which update handler a store constituent dispatches to.
#[derive(Copy, Clone)]
enum Variant {
    Particle,
    Composite,
    Event,
}

/// Owner of all simulation structure and the main loop.
pub struct Simulation {
    /// Absolute simulation time.  Non-decreasing over a run.
    pub time: Time,
    /// The 1D lattice all particles live on.
    pub track: Track,
    /// The update queue, in absolute time.
    pub queue: OrderedQueue,
    /// Collision registry and pending-action barrier.
    pub collider: Collider,
    /// The agent-kind subtype lattice.
    pub kinds: KindTable,
    /// Snapshot collection; data accumulates in `reporter.out`.
    pub reporter: Reporter,
    /// The run's random source.
    pub rng: SimRng,
    /// Everything currently loaded.
    pub agents: AgentStore,
}

impl Simulation {
    /// Start configuring a simulation over a track of `length` cells.
    pub fn builder(length: usize) -> SimBuilder {
        SimBuilder::new(length)
    }

    /// Intern a domain-specific agent kind.
    pub fn register_kind(&mut self, name: &str, parents: &[Kind]) -> Kind {
        self.kinds.register(name, parents)
    }

    // ── Loading and unloading ─────────────────────────────────────────────

    /// Load a constituent into the simulation.
    ///
    /// Capability bookkeeping runs first — a queue entry at `now +
    /// next_update` with `last_update = now`, reporter registration for
    /// reportables — then the variant's own load body: particles are placed
    /// on the track (random empty cell and random direction where
    /// unspecified), composites load their heads.
    pub fn load(&mut self, constituent: impl Into<Constituent>) -> SimResult<AgentId> {
        let constituent = constituent.into();
        let reportable = constituent.is_reportable();
        let id = self.agents.insert(constituent);

        let now = self.time;
        let next = match self.agents.get_mut(id) {
            Some(c) => {
                c.set_last_update(now);
                c.next_update()
            }
            None => f64::INFINITY,
        };
        self.queue.insert(now + next.max(0.0), Payload::Agent(id));
        if reportable {
            self.reporter.register(id);
        }

        match self.load_body(id) {
            Ok(()) => Ok(id),
            Err(err) => {
                // Roll the half-loaded constituent back out.
                self.unload_now(id)?;
                Err(err)
            }
        }
    }

    fn load_body(&mut self, id: AgentId) -> SimResult<()> {
        match self.agents.get(id) {
            Some(Constituent::Particle(_)) => self.place_particle(id),
            Some(Constituent::Composite(_)) => self.load_heads(id),
            _ => Ok(()),
        }
    }

    fn place_particle(&mut self, id: AgentId) -> SimResult<()> {
        if matches!(self.motion_of(id), Some(m) if m.direction.is_none()) {
            let direction = Direction::random(&mut self.rng);
            if let Some(motion) = self.motion_mut(id) {
                motion.direction = Some(direction);
            }
        }

        let len = self.track.len() as i64;
        let position = match self.particle(id).and_then(|p| p.position) {
            Some(pos) => {
                if pos < 0 || pos >= len {
                    return Err(SimError::BadArgument(format!(
                        "load position {pos} outside track of length {len}"
                    )));
                }
                pos
            }
            None => {
                let empties = self.track.empty_positions();
                let &pos = self.rng.choose(&empties).ok_or(SimError::NoFreeCell)?;
                if let Some(particle) = self.particle_mut(id) {
                    particle.position = Some(pos);
                }
                pos
            }
        };
        self.track.insert(position, id);
        Ok(())
    }

    fn load_heads(&mut self, id: AgentId) -> SimResult<()> {
        let pending = match self.composite_mut(id) {
            Some(c) => std::mem::take(&mut c.pending_heads),
            None => return Ok(()),
        };
        let mut head_ids = Vec::with_capacity(pending.len());
        for mut head in pending {
            head.parent = Some(id);
            match self.load(head) {
                Ok(head_id) => {
                    // Heads are full particles but only the composite reports.
                    self.reporter.unregister(head_id);
                    head_ids.push(head_id);
                }
                Err(err) => {
                    if let Some(c) = self.composite_mut(id) {
                        c.heads = head_ids;
                    }
                    return Err(err);
                }
            }
        }
        if let Some(c) = self.composite_mut(id) {
            c.heads = head_ids;
        }
        Ok(())
    }

    /// Schedule `id` for unloading (via an immediate [`Event`]).
    ///
    /// This is the only safe way to remove an agent: synchronous removal in
    /// the middle of an update corrupts the queue.
    pub fn unload(&mut self, id: AgentId) -> SimResult<()> {
        self.load(Event::unload_of(id))?;
        Ok(())
    }

    /// Remove `id` from the simulation *right now*: every track cell it
    /// occupies, every queue entry carrying it, its reporter registration,
    /// and — for composites — all of its heads.
    ///
    /// Idempotent: unloading an absent id is a no-op.  Call this only from
    /// within an event's action; anywhere else, use [`Simulation::unload`].
    pub fn unload_now(&mut self, id: AgentId) -> SimResult<()> {
        let Some(constituent) = self.agents.remove(id) else {
            return Ok(());
        };
        self.queue.purge_payload(Payload::Agent(id));
        self.reporter.unregister(id);

        match constituent {
            Constituent::Particle(particle) => {
                self.track.remove_all(id);
                if let Some(life) = particle.life {
                    self.run_expiry_hook(life)?;
                }
            }
            Constituent::Composite(composite) => {
                for head in composite.heads {
                    self.unload_now(head)?;
                }
                if let Some(life) = composite.life {
                    self.run_expiry_hook(life)?;
                }
            }
            Constituent::Event(_) => {}
        }
        Ok(())
    }

    fn run_expiry_hook(&mut self, life: Life) -> SimResult<()> {
        if is_due(life.remaining) {
            if let Some(hook) = life.on_expire {
                self.load(Event::from_deferred(hook))?;
            }
        }
        Ok(())
    }

    // ── The main loop ─────────────────────────────────────────────────────

    /// Run for at most `duration` time units.
    ///
    /// Exits when the queue is empty (clean termination; time stays at the
    /// last processed event) or when the next entry lies past the deadline —
    /// that entry is re-inserted untouched and time clamps to the deadline,
    /// so a later `run` call picks it up.  Entries scheduled exactly at the
    /// deadline still execute.
    ///
    /// Errors raised inside an update propagate out and terminate the run;
    /// partial results remain in [`Simulation::reporter`].
    pub fn run(&mut self, duration: f64) -> SimResult<()> {
        let t_end = self.time + duration;
        loop {
            let Ok(entry) = self.queue.pop() else {
                break; // queue empty — clean termination
            };
            if entry.time > t_end {
                self.queue.insert(entry.time, entry.payload);
                self.time = t_end;
                break;
            }
            self.time = entry.time;
            self.dispatch(entry.payload)?;
            if self.reporter.is_event_based() {
                self.record_report_at(self.time);
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, payload: Payload) -> SimResult<()> {
        match payload {
            Payload::Reporter => self.update_reporter(),
            Payload::Agent(id) => {
                let variant = match self.agents.get(id) {
                    None => return Ok(()), // stale entry; cleanup drains silently
                    Some(Constituent::Particle(_)) => Variant::Particle,
                    Some(Constituent::Composite(_)) => Variant::Composite,
                    Some(Constituent::Event(_)) => Variant::Event,
                };
                match variant {
                    Variant::Particle => self.update_particle(id),
                    Variant::Composite => self.update_composite(id),
                    Variant::Event => self.update_event(id),
                }
            }
        }
    }

    /// Remove `payload` from the queue and re-insert it `dt` from now.
    ///
    /// The removal is idempotent (a popped payload is already gone) and the
    /// offset is clamped to zero so a drifted-negative countdown can never
    /// move time backwards.
    pub fn requeue(&mut self, payload: Payload, dt: f64) {
        self.queue.purge_payload(payload);
        self.queue.insert(self.time + dt.max(0.0), payload);
    }

    /// Remove every queue entry carrying `payload`.  Idempotent.
    pub fn unqueue(&mut self, payload: Payload) {
        self.queue.purge_payload(payload);
    }

    // ── Per-variant updates ───────────────────────────────────────────────

    fn update_particle(&mut self, id: AgentId) -> SimResult<()> {
        let now = self.time;
        let Some(particle) = self.particle_mut(id) else {
            return Ok(());
        };
        let elapsed = now - particle.last_update;
        if let Some(motion) = particle.motion.as_mut() {
            if motion.recover_speed {
                motion.speed = motion.free_speed;
            }
        }

        // Lifetime first, so an expiring walker still gets its final moves.
        let expired = match self.particle_mut(id).and_then(|p| p.life.as_mut()) {
            Some(life) => {
                life.remaining -= elapsed;
                is_due(life.remaining)
            }
            None => false,
        };
        if expired {
            self.unload(id)?;
        }

        let walker = self
            .motion_of(id)
            .map(|motion| (motion.heading(), motion.p_forward.is_some()));
        if let Some((dir, backward_aware)) = walker {
            // Random walkers may step backwards, so they look both ways.
            if backward_aware {
                self.check_collisions(id, -dir.delta())?;
            }
            self.check_collisions(id, dir.delta())?;

            // Collision actions may have flipped direction or changed speed;
            // everything below re-reads current state.
            let step_due = match self.motion_mut(id) {
                Some(motion) => {
                    motion.until_step -= elapsed;
                    is_due(motion.until_step)
                }
                None => false,
            };
            if step_due {
                self.step(id)?;
                if let Some(motion) = self.motion_mut(id) {
                    motion.until_step = 1.0 / motion.speed;
                }
            }
        }

        self.housekeep(id, now);
        Ok(())
    }

    fn update_composite(&mut self, id: AgentId) -> SimResult<()> {
        let now = self.time;
        let expired = match self.composite_mut(id) {
            Some(composite) => {
                let elapsed = now - composite.last_update;
                match composite.life.as_mut() {
                    Some(life) => {
                        life.remaining -= elapsed;
                        is_due(life.remaining)
                    }
                    None => false,
                }
            }
            None => return Ok(()),
        };
        if expired {
            self.unload(id)?;
        }
        self.housekeep(id, now);
        Ok(())
    }

    fn update_event(&mut self, id: AgentId) -> SimResult<()> {
        let now = self.time;
        let (due, remaining, action) = match self.agents.get_mut(id) {
            Some(Constituent::Event(event)) => {
                let elapsed = now - event.last_update;
                event.countdown -= elapsed;
                event.last_update = now;
                if is_due(event.countdown) {
                    (true, 0.0, event.take_action())
                } else {
                    (false, event.countdown, None)
                }
            }
            _ => return Ok(()),
        };

        if due {
            // Fires exactly once, then the event is gone for good.
            self.agents.remove(id);
            self.queue.purge_payload(Payload::Agent(id));
            if let Some(action) = action {
                action(self)?;
            }
        } else {
            // Woken early: keep the remaining countdown scheduled.
            self.requeue(Payload::Agent(id), remaining);
        }
        Ok(())
    }

    /// Shared update epilogue: stamp `last_update`, re-queue for the next
    /// wake-up.  One requeue per constituent per update — a lifetime mixed
    /// into a walker must not schedule a second entry.
    fn housekeep(&mut self, id: AgentId, now: Time) {
        let next = match self.agents.get_mut(id) {
            Some(c) => {
                c.set_last_update(now);
                c.next_update()
            }
            None => return,
        };
        self.requeue(Payload::Agent(id), next);
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Attempt one step of walker `id`.
    ///
    /// Consults the walker's stepping rule; `None` aborts quietly.  On
    /// permission, the rule's actions run in order, then the walker moves one
    /// cell along the effective direction.  Failing to find the walker in its
    /// recorded cell is fatal: off the track it means missing boundaries,
    /// on the track a bookkeeping bug.
    fn step(&mut self, id: AgentId) -> SimResult<()> {
        let Some(particle) = self.particle(id) else {
            return Ok(());
        };
        let Some(motion) = particle.motion.as_ref() else {
            return Ok(());
        };
        let dir = motion.heading();
        let p_forward = motion.p_forward;
        let rule = motion.rule;

        // A random walker sometimes steps against its persistent direction;
        // the orientation itself is untouched.
        let effective = match p_forward {
            Some(p) if !self.rng.gen_bool(p) => dir.flip(),
            _ => dir,
        };

        let Some(actions) = rule(&*self, id, effective) else {
            return Ok(());
        };
        for action in actions {
            self.apply_action(action)?;
        }

        let Some(position) = self.position_of(id) else {
            return Ok(());
        };
        if !self.track.take(position, id) {
            let len = self.track.len();
            return Err(if position < 0 || position >= len as i64 {
                SimError::OffTrack {
                    id,
                    position,
                    len,
                }
            } else {
                SimError::MissingOnTrack { id, position }
            });
        }
        let next = position + effective.delta();
        self.track.insert(next, id);
        if let Some(particle) = self.particle_mut(id) {
            particle.position = Some(next);
        }
        Ok(())
    }

    // ── Collision dispatch ────────────────────────────────────────────────

    /// Observe collisions between `id` and everyone in the cell at
    /// `relative` offset from it, then execute all accumulated actions as
    /// one barrier.
    pub fn check_collisions(&mut self, id: AgentId, relative: i64) -> SimResult<()> {
        let Some(position) = self.position_of(id) else {
            return Ok(());
        };
        let neighbors: Vec<AgentId> = self.track.cell(position + relative).to_vec();
        for other in neighbors {
            if relative == 0 && other == id {
                continue;
            }
            self.new_collision(id, other);
        }
        self.execute_collisions()
    }

    /// Run every matching registry rule for the pair `(a, b)` and append the
    /// returned actions to the pending list.  Nothing executes yet.
    pub fn new_collision(&mut self, a: AgentId, b: AgentId) {
        let (Some(kind_a), Some(kind_b)) = (self.kind_of(a), self.kind_of(b)) else {
            return;
        };
        let mut collected = Vec::new();
        {
            let sim: &Simulation = self;
            for entry in &sim.collider.entries {
                if !(sim.kinds.is_a(kind_a, entry.first) && sim.kinds.is_a(kind_b, entry.second)) {
                    continue;
                }
                let (x, y) = if entry.swapped { (b, a) } else { (a, b) };
                collected.extend((entry.rule)(sim, x, y));
                if entry.first == entry.second {
                    // Symmetric pair: fire once per argument order.
                    collected.extend((entry.rule)(sim, y, x));
                }
            }
        }
        self.collider.pending.extend(collected);
    }

    /// Drain the pending list FIFO, applying each action.
    ///
    /// Runs until the list is empty, so actions that enqueue further actions
    /// are drained in the same barrier.
    pub fn execute_collisions(&mut self) -> SimResult<()> {
        while !self.collider.pending.is_empty() {
            let batch = std::mem::take(&mut self.collider.pending);
            for action in batch {
                self.apply_action(action)?;
            }
        }
        Ok(())
    }

    fn apply_action(&mut self, action: Action) -> SimResult<()> {
        match action {
            Action::FlipDirection(id) => {
                if let Some(motion) = self.motion_mut(id) {
                    motion.direction = Some(motion.heading().flip());
                }
                Ok(())
            }
            Action::SetSpeed(id, speed) => {
                if let Some(motion) = self.motion_mut(id) {
                    motion.speed = speed;
                }
                Ok(())
            }
            Action::EnqueueUnload(id) => self.unload(id),
            Action::ShiftCells { lo, hi, dir } => {
                let moved = self.track.drain_range(lo, hi);
                for id in moved {
                    let Some(particle) = self.particle_mut(id) else {
                        continue;
                    };
                    let Some(pos) = particle.position else {
                        continue;
                    };
                    let next = pos + dir.delta();
                    particle.position = Some(next);
                    self.track.insert(next, id);
                }
                Ok(())
            }
            Action::Custom(f) => f(self),
        }
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    fn update_reporter(&mut self) -> SimResult<()> {
        let now = self.time;
        let (fired, record_time, next) = match &mut self.reporter.mode {
            ReportMode::Event => return Ok(()),
            ReportMode::Interval {
                dt,
                next_report,
                offset,
                last_update,
            } => {
                let elapsed = now - *last_update;
                *next_report -= elapsed;
                let fired = is_due(*next_report);
                if fired {
                    *next_report += *dt;
                }
                *last_update = now;
                (fired, now - *offset, *next_report)
            }
        };

        if fired {
            self.record_report_at(record_time);
        }
        self.requeue(Payload::Reporter, next);
        Ok(())
    }

    /// Snapshot every registered reportable into a new report.
    pub fn record_report_at(&mut self, time: Time) {
        let mut entries: std::collections::BTreeMap<Kind, Vec<Snapshot>> =
            std::collections::BTreeMap::new();
        for &id in self.reporter.registered() {
            let Some((kind, snapshot)) = self.snapshot_of(id) else {
                continue;
            };
            entries.entry(kind).or_default().push(snapshot);
        }
        self.reporter.out.push(Report { time, entries });
    }

    fn snapshot_of(&self, id: AgentId) -> Option<(Kind, Snapshot)> {
        match self.agents.get(id)? {
            Constituent::Particle(particle) => {
                Some((particle.kind, Snapshot::Pos(particle.position?)))
            }
            Constituent::Composite(composite) => {
                let positions = composite
                    .heads
                    .iter()
                    .filter_map(|&head| self.position_of(head))
                    .collect();
                Some((composite.kind, Snapshot::Tuple(positions)))
            }
            Constituent::Event(_) => None,
        }
    }

    // ── Read accessors (used by rules and domain code) ────────────────────

    pub fn particle(&self, id: AgentId) -> Option<&Particle> {
        self.agents.get(id)?.as_particle()
    }

    pub fn particle_mut(&mut self, id: AgentId) -> Option<&mut Particle> {
        self.agents.get_mut(id)?.as_particle_mut()
    }

    pub fn composite(&self, id: AgentId) -> Option<&Composite> {
        self.agents.get(id)?.as_composite()
    }

    pub fn composite_mut(&mut self, id: AgentId) -> Option<&mut Composite> {
        self.agents.get_mut(id)?.as_composite_mut()
    }

    /// The walking state of `id`, if it is a walker.
    pub fn motion_of(&self, id: AgentId) -> Option<&Motion> {
        self.particle(id)?.motion.as_ref()
    }

    pub fn motion_mut(&mut self, id: AgentId) -> Option<&mut Motion> {
        self.particle_mut(id)?.motion.as_mut()
    }

    /// The track position of `id`, if it is a placed particle.
    pub fn position_of(&self, id: AgentId) -> Option<i64> {
        self.particle(id)?.position
    }

    /// The kind tag of `id` (events carry none).
    pub fn kind_of(&self, id: AgentId) -> Option<Kind> {
        match self.agents.get(id)? {
            Constituent::Particle(p) => Some(p.kind),
            Constituent::Composite(c) => Some(c.kind),
            Constituent::Event(_) => None,
        }
    }

    /// Whether `id`'s kind is `kind` or a subtype of it.
    pub fn is_kind(&self, id: AgentId, kind: Kind) -> bool {
        self.kind_of(id)
            .is_some_and(|k| self.kinds.is_a(k, kind))
    }

    /// Whether any occupant of cell `i` is of `kind` (or a subtype).
    pub fn cell_has_kind(&self, i: i64, kind: Kind) -> bool {
        self.track.cell(i).iter().any(|&id| self.is_kind(id, kind))
    }
}
