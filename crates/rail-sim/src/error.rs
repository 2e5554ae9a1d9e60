use rail_core::AgentId;
use rail_queue::QueueError;
use thiserror::Error;

/// Errors surfaced by the simulation.
///
/// Consistency errors are fatal: they propagate out of
/// [`Simulation::run`][crate::Simulation::run] and terminate the run (partial
/// results remain in the reporter).  `OffTrack` points at missing boundaries
/// in the caller's setup; `MissingOnTrack` at a bookkeeping bug inside the
/// engine or a custom rule.
#[derive(Debug, Error)]
pub enum SimError {
    /// A walker's recorded position lies outside the track.  Load track-end
    /// sentinels (or a blocking boundary) to keep walkers on the track.
    #[error("agent {id} left the track: position {position} not in [0, {len})")]
    OffTrack {
        id: AgentId,
        position: i64,
        len: usize,
    },

    /// A walker was not in the cell its position points at.
    #[error("agent {id} missing from its recorded cell {position}; track bookkeeping is inconsistent")]
    MissingOnTrack { id: AgentId, position: i64 },

    /// Malformed input at an API boundary (builder arguments, resample
    /// discretization, load positions).
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// Random placement was requested but every cell is occupied.
    #[error("no free cell left on the track")]
    NoFreeCell,

    #[error(transparent)]
    Queue(#[from] QueueError),
}

pub type SimResult<T> = Result<T, SimError>;
