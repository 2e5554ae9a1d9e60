//! Snapshot capture and post-hoc resampling.
//!
//! Two reporting modes share the same output shape:
//!
//! - **event-based** — the main loop requests a snapshot after *every*
//!   update.  Nothing is ever missed, at the cost of a lot of near-duplicate
//!   data on busy tracks.
//! - **interval** — the reporter is itself a queue citizen waking every `dt`.
//!   It wakes at `grid + offset` (offset [`REPORT_OFFSET`]) so updates
//!   scheduled exactly on a grid point run first, and records the snapshot
//!   with the offset subtracted, keeping the public timeline on the clean
//!   grid.
//!
//! [`resample`] converts an event-based recording into an interval-style one
//! after the fact: for each grid point, the latest report at or before it is
//! deep-copied and re-timestamped.

use std::collections::BTreeMap;

use rail_core::{AgentId, Kind, REPORT_OFFSET, Snapshot, Time};

use crate::{SimError, SimResult};

// ── Report ────────────────────────────────────────────────────────────────────

/// One snapshot of every registered reportable, grouped by kind.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Absolute simulation time of the snapshot.
    pub time: Time,
    /// Snapshots per agent kind, in registration order within each kind.
    pub entries: BTreeMap<Kind, Vec<Snapshot>>,
}

impl Report {
    /// Snapshots recorded for `kind` (empty if none).
    pub fn snapshots(&self, kind: Kind) -> &[Snapshot] {
        self.entries.get(&kind).map_or(&[], |v| v.as_slice())
    }

    /// Kinds present in this report.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.entries.keys().copied()
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

/// How and when snapshots are taken.
pub enum ReportMode {
    /// Snapshot after every update.
    Event,
    /// Snapshot every `dt`, driven by the reporter's own queue entry.
    Interval {
        dt: f64,
        /// Countdown to the next report wake-up.
        next_report: f64,
        /// How far the wake-ups trail the grid (see module docs).
        offset: f64,
        last_update: Time,
    },
}

/// Collects simulation output.
pub struct Reporter {
    pub mode: ReportMode,
    registered: Vec<AgentId>,
    /// All reports so far, time-ordered ascending.
    pub out: Vec<Report>,
}

impl Reporter {
    /// A reporter snapshotting after every update.
    pub fn event_based() -> Reporter {
        Reporter {
            mode: ReportMode::Event,
            registered: Vec::new(),
            out: Vec::new(),
        }
    }

    /// A reporter snapshotting every `dt` (first report at time 0).
    pub fn interval(dt: f64) -> Reporter {
        Reporter {
            mode: ReportMode::Interval {
                dt,
                next_report: REPORT_OFFSET,
                offset: REPORT_OFFSET,
                last_update: 0.0,
            },
            registered: Vec::new(),
            out: Vec::new(),
        }
    }

    pub fn is_event_based(&self) -> bool {
        matches!(self.mode, ReportMode::Event)
    }

    /// Register a reportable.  Double registration is ignored.
    pub fn register(&mut self, id: AgentId) {
        if !self.registered.contains(&id) {
            self.registered.push(id);
        }
    }

    /// Remove a reportable; absent ids are ignored so cleanup is idempotent.
    pub fn unregister(&mut self, id: AgentId) {
        self.registered.retain(|&r| r != id);
    }

    pub fn is_registered(&self, id: AgentId) -> bool {
        self.registered.contains(&id)
    }

    /// Currently registered reportables, in registration order.
    pub fn registered(&self) -> &[AgentId] {
        &self.registered
    }

    /// Resample [`Reporter::out`] onto a regular grid.  See [`resample`].
    pub fn resample(
        &self,
        start: Option<f64>,
        stop: Option<f64>,
        step: f64,
    ) -> SimResult<Vec<Report>> {
        resample(&self.out, start, stop, step)
    }
}

// ── Resampling ────────────────────────────────────────────────────────────────

/// Convert a report sequence into one sampled at `start + i·step` for every
/// grid point in `[start, stop)`.
///
/// Each output entry is a deep copy of the latest input report with
/// `time <= grid_point + REPORT_OFFSET`, re-timestamped to the grid point.
/// Grid points earlier than the first input report produce no entry.
///
/// `start` defaults to the first recorded time, `stop` to the last recorded
/// time plus one step.  A non-positive or non-finite `step`, a non-finite
/// bound, or open bounds without any recorded reports are
/// [`SimError::BadArgument`].
pub fn resample(
    reports: &[Report],
    start: Option<f64>,
    stop: Option<f64>,
    step: f64,
) -> SimResult<Vec<Report>> {
    if !(step > 0.0) || !step.is_finite() {
        return Err(SimError::BadArgument(format!(
            "resample step must be positive and finite, got {step}"
        )));
    }
    if (start.is_none() || stop.is_none()) && reports.is_empty() {
        return Err(SimError::BadArgument(
            "cannot infer resample bounds from an empty report sequence".into(),
        ));
    }
    let start = match start {
        Some(s) => s,
        None => reports[0].time,
    };
    let stop = match stop {
        Some(s) => s,
        None => reports[reports.len() - 1].time + step,
    };
    if !start.is_finite() || !stop.is_finite() {
        return Err(SimError::BadArgument(format!(
            "resample bounds must be finite, got [{start}, {stop})"
        )));
    }

    let mut out = Vec::new();
    let mut source = 0usize; // index of the latest usable report so far
    for i in 0.. {
        let t = start + i as f64 * step;
        if t >= stop {
            break;
        }
        while source + 1 < reports.len() && reports[source + 1].time <= t + REPORT_OFFSET {
            source += 1;
        }
        match reports.get(source) {
            Some(report) if report.time <= t + REPORT_OFFSET => {
                let mut copy = report.clone();
                copy.time = t;
                out.push(copy);
            }
            _ => {} // grid point before the first report
        }
    }
    Ok(out)
}
