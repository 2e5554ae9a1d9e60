//! Timed deferred actions.
//!
//! Structural mutations — above all unloading — must not happen in the middle
//! of another agent's update: half the update's bookkeeping would run against
//! the old world, half against the new.  An [`Event`] defers the mutation to
//! its own queue slot instead.  Events are full queue citizens: they carry a
//! relative countdown, fire exactly once when it elapses, and then retire
//! from both queue and store.

use rail_core::{AgentId, Time};

use crate::action::DeferredFn;
use crate::{SimResult, Simulation};

/// A deferred action scheduled on the update queue.
pub struct Event {
    /// Remaining time until the action fires.
    pub countdown: f64,
    pub(crate) action: Option<DeferredFn>,
    pub(crate) last_update: Time,
}

impl Event {
    /// An event firing `f` as soon as it is popped (countdown 0).
    pub fn call(f: impl FnOnce(&mut Simulation) -> SimResult<()> + 'static) -> Event {
        Event::from_deferred(Box::new(f))
    }

    pub(crate) fn from_deferred(action: DeferredFn) -> Event {
        Event {
            countdown: 0.0,
            action: Some(action),
            last_update: 0.0,
        }
    }

    /// Delay the action by `delay` time units from load.
    pub fn after(mut self, delay: f64) -> Event {
        self.countdown = delay;
        self
    }

    /// The event that unloads `id`: removes it from the track, the queue, and
    /// the reporter.  [`Simulation::unload`][crate::Simulation::unload] is the
    /// usual shorthand for loading one of these.
    pub fn unload_of(id: AgentId) -> Event {
        Event::call(move |sim| sim.unload_now(id))
    }

    pub(crate) fn take_action(&mut self) -> Option<DeferredFn> {
        self.action.take()
    }
}
