//! Deferred mutations produced by collision and stepping rules.
//!
//! Rules never touch simulation state directly: they *observe* and return
//! actions, which the dispatcher executes later in one FIFO barrier.  This is
//! what keeps multiple rules firing on the same collision from seeing each
//! other's half-applied effects.
//!
//! The common mutations are a small tagged sum so rules stay inspectable;
//! [`Action::Custom`] is the escape hatch for rule authors who need more.

use std::fmt;

use rail_core::{AgentId, Direction};

use crate::{SimResult, Simulation};

/// A deferred closure run against the simulation, used by events, expiry
/// hooks, and [`Action::Custom`].
pub type DeferredFn = Box<dyn FnOnce(&mut Simulation) -> SimResult<()>>;

/// One deferred mutation of simulation state.
pub enum Action {
    /// Invert the persistent direction of a walker.
    FlipDirection(AgentId),
    /// Overwrite a walker's current speed (its free speed is untouched).
    SetSpeed(AgentId, f64),
    /// Schedule an unload event for an agent.
    EnqueueUnload(AgentId),
    /// Move every agent in cells `lo..hi` one cell along `dir`, emptying the
    /// vacated end of the range.  The workhorse of the push rules.
    ShiftCells { lo: i64, hi: i64, dir: Direction },
    /// Arbitrary rule-author extension.
    Custom(DeferredFn),
}

impl Action {
    /// Wrap a closure as a custom action.
    pub fn custom(f: impl FnOnce(&mut Simulation) -> SimResult<()> + 'static) -> Action {
        Action::Custom(Box::new(f))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::FlipDirection(id) => write!(f, "FlipDirection({id})"),
            Action::SetSpeed(id, v) => write!(f, "SetSpeed({id}, {v})"),
            Action::EnqueueUnload(id) => write!(f, "EnqueueUnload({id})"),
            Action::ShiftCells { lo, hi, dir } => {
                write!(f, "ShiftCells {{ {lo}..{hi}, {dir} }}")
            }
            Action::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
