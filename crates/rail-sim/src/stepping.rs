//! A library of stepping rules.
//!
//! A stepping rule decides whether a walker may take its step and what has to
//! happen immediately before.  It observes the simulation and returns
//! `Some(actions)` to permit the step (the actions run first, in order) or
//! `None` to abort it.  An empty action list means "step, nothing to
//! prepare".
//!
//! The rule receives the *effective* step direction as an argument: normally
//! the walker's persistent heading, but a random walker's occasional
//! backwards step — and a push-soft pusher probing the walkers in front of
//! it — pass a different one.  Rules therefore never need to mutate an
//! orientation to ask "could you move that way?".

use rail_core::kind::{TRACK_END, WALKER};
use rail_core::{AgentId, Direction};

use crate::{Action, Simulation};

/// Decides whether and how a walker steps.  `None` aborts the step.
pub type SteppingRule = fn(&Simulation, AgentId, Direction) -> Option<Vec<Action>>;

/// Step only if the target cell is completely free.
pub fn careful(sim: &Simulation, walker: AgentId, dir: Direction) -> Option<Vec<Action>> {
    let pos = sim.position_of(walker)?;
    if sim.track.is_cell_empty(pos + dir.delta()) {
        Some(Vec::new())
    } else {
        None
    }
}

/// Step through anything except a track end.
pub fn transparent(sim: &Simulation, walker: AgentId, dir: Direction) -> Option<Vec<Action>> {
    let pos = sim.position_of(walker)?;
    if sim.cell_has_kind(pos + dir.delta(), TRACK_END) {
        None
    } else {
        Some(Vec::new())
    }
}

/// Soft pushing: ask the walkers in front whether they would move.
///
/// The target cell must be occupied by walkers only.  Each is probed with its
/// *own* stepping rule, oriented the pusher's way; if any refuses, the whole
/// step aborts.  Otherwise their preparatory actions run, followed by one
/// shift that moves them all one cell on.  Only stepping rules are consulted
/// — the pushed walkers' collision rules do not fire for being pushed.
pub fn push_soft(sim: &Simulation, walker: AgentId, dir: Direction) -> Option<Vec<Action>> {
    let pos = sim.position_of(walker)?;
    let target = pos + dir.delta();
    let cell = sim.track.cell(target);
    if cell.is_empty() || !cell.iter().all(|&other| sim.is_kind(other, WALKER)) {
        return None;
    }

    let mut actions = Vec::new();
    for &other in cell {
        let rule = sim.motion_of(other)?.rule;
        actions.extend(rule(sim, other, dir)?);
    }
    actions.push(Action::ShiftCells {
        lo: target,
        hi: target + 1,
        dir,
    });
    Some(actions)
}

/// Hard pushing: move everyone in the target cell, without asking.
///
/// Only a track end stops it.  Note that the displaced agents all land in the
/// same next cell — a column being pushed collapses.  Use [`push_train`] when
/// spacing must survive.
pub fn push_hard(sim: &Simulation, walker: AgentId, dir: Direction) -> Option<Vec<Action>> {
    let pos = sim.position_of(walker)?;
    let target = pos + dir.delta();
    if sim.cell_has_kind(target, TRACK_END) {
        return None;
    }
    Some(vec![Action::ShiftCells {
        lo: target,
        hi: target + 1,
        dir,
    }])
}

/// Push a whole train of contiguous occupants one cell on, atomically.
///
/// The train is the run of non-empty cells from the walker's front to the
/// nearest empty cell in the step direction.  If any train cell holds a track
/// end the step aborts; otherwise a single shift rewrites the range, so
/// gaps beyond the train and the spacing inside it are preserved.
pub fn push_train(sim: &Simulation, walker: AgentId, dir: Direction) -> Option<Vec<Action>> {
    let pos = sim.position_of(walker)?;
    let front = pos + dir.delta();
    let first_empty = sim.track.next_empty(pos, dir);
    let (lo, hi) = match dir {
        Direction::Fwd => (front, first_empty),
        Direction::Back => (first_empty + 1, front + 1),
    };

    let train = sim.track.aggregate(lo..hi);
    if train.iter().any(|&p| sim.is_kind(p, TRACK_END)) {
        return None;
    }
    Some(vec![Action::ShiftCells { lo, hi, dir }])
}
