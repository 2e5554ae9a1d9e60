//! `rail-core` — foundational types for the railsim engine.
//!
//! This crate is a dependency of every other `rail-*` crate.  It intentionally
//! has no `rail-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`ids`]       | `AgentId`                                            |
//! | [`time`]      | `Time` alias, `EPS`, `REPORT_OFFSET`                 |
//! | [`direction`] | `Direction` (the two ways along the track)           |
//! | [`kind`]      | `Kind`, `KindTable` (agent-kind subtype lattice)     |
//! | [`rng`]       | `SimRng` (seedable simulation RNG)                   |
//! | [`snapshot`]  | `Snapshot` (opaque report values)                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod direction;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod snapshot;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use ids::AgentId;
pub use kind::{Kind, KindTable};
pub use rng::SimRng;
pub use snapshot::Snapshot;
pub use time::{EPS, REPORT_OFFSET, Time, is_due};
