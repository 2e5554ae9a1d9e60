//! A library of collision rules.
//!
//! Every rule here first checks that the collision actually matters to its
//! first argument: a directional particle cares about what sits in front of
//! it, not about being bumped from behind.  The check is `facing` — the
//! walker's next cell is the other particle's cell.
//!
//! Rules observe and return actions; they never mutate.  See the collider
//! module for why.

use rail_core::AgentId;

use crate::{Action, Simulation};

/// Whether `walker`'s next cell (along its persistent direction) is exactly
/// where `other` sits.
pub fn facing(sim: &Simulation, walker: AgentId, other: AgentId) -> bool {
    match (
        sim.position_of(walker),
        sim.motion_of(walker),
        sim.position_of(other),
    ) {
        (Some(pos), Some(motion), Some(other_pos)) => {
            pos + motion.heading().delta() == other_pos
        }
        _ => false,
    }
}

/// The walker reverses direction.
pub fn reflect(sim: &Simulation, walker: AgentId, other: AgentId) -> Vec<Action> {
    if facing(sim, walker, other) {
        vec![Action::FlipDirection(walker)]
    } else {
        vec![]
    }
}

/// The collision partner is kicked off the track.
pub fn kick_off(sim: &Simulation, walker: AgentId, other: AgentId) -> Vec<Action> {
    if facing(sim, walker, other) {
        vec![Action::EnqueueUnload(other)]
    } else {
        vec![]
    }
}

/// The walker itself falls off the track.
pub fn fall_off(sim: &Simulation, walker: AgentId, other: AgentId) -> Vec<Action> {
    if facing(sim, walker, other) {
        vec![Action::EnqueueUnload(walker)]
    } else {
        vec![]
    }
}

/// Both partners leave the track.
pub fn burn_off(sim: &Simulation, walker: AgentId, other: AgentId) -> Vec<Action> {
    if facing(sim, walker, other) {
        vec![
            Action::EnqueueUnload(walker),
            Action::EnqueueUnload(other),
        ]
    } else {
        vec![]
    }
}

/// Rule factory: the walker drops to `free_speed / factor` while blocked.
///
/// Pair with [`Particle::with_recovering_speed`][crate::Particle::with_recovering_speed]
/// so the walker returns to full speed once the blocker is gone.
pub fn slow_down(factor: f64) -> impl Fn(&Simulation, AgentId, AgentId) -> Vec<Action> {
    move |sim, walker, other| {
        if !facing(sim, walker, other) {
            return vec![];
        }
        match sim.motion_of(walker) {
            Some(motion) => vec![Action::SetSpeed(walker, motion.free_speed / factor)],
            None => vec![],
        }
    }
}
