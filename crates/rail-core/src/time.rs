//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous: an absolute `f64` number of simulated time units,
//! monotonically non-decreasing within a run.  The queue stores absolute
//! times; updateables carry relative countdowns (`until_step`, lifetimes,
//! event delays) that are decremented by the elapsed time between wake-ups.
//!
//! Countdown comparisons go through [`is_due`] rather than `== 0.0`: after a
//! few hundred subtractions a countdown that conceptually hit zero sits a few
//! ulps to either side of it, so "due" means "within [`EPS`] of zero or past
//! it".

/// Absolute simulation time, in simulated time units.
pub type Time = f64;

/// Numerical tolerance for countdown expiry checks.
///
/// A countdown is considered elapsed once it has decayed to `<= EPS`.
pub const EPS: f64 = 1e-10;

/// Offset by which the interval reporter trails the report grid.
///
/// The reporter wakes at `grid_point + REPORT_OFFSET` so that updates
/// scheduled exactly on a grid point run first, then records the snapshot
/// with the offset subtracted — the public timeline stays on the clean grid.
pub const REPORT_OFFSET: f64 = 1e-5;

/// Whether a relative countdown has elapsed (within [`EPS`] tolerance).
#[inline(always)]
pub fn is_due(countdown: f64) -> bool {
    countdown <= EPS
}
