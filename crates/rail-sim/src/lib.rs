//! `rail-sim` — the simulation root of the railsim engine.
//!
//! # The update cycle
//!
//! ```text
//! loop:
//!   ① Pop      — earliest (time, payload) entry; time advances to it.
//!   ② Update   — the payload's handler runs: check collisions, count down,
//!                maybe step, maybe fire; it re-queues itself if it wants a
//!                future wake-up.
//!   ③ Barrier  — collisions observed during the update accumulated actions;
//!                they all executed FIFO before the update's step resumed.
//!   ④ Report   — event-based reporting snapshots after every update.
//! ```
//!
//! # What lives here
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`sim`]        | `Simulation` — owner of everything, main loop        |
//! | [`builder`]    | `SimBuilder`                                         |
//! | [`store`]      | `Constituent`, `AgentStore`                          |
//! | [`particle`]   | `Particle`, `Motion`, `Life`                         |
//! | [`composite`]  | `Composite` (multi-head bundles)                     |
//! | [`event`]      | `Event` (timed deferred actions)                     |
//! | [`action`]     | `Action` (deferred mutations)                        |
//! | [`collider`]   | `Collider`, rule registration and dispatch           |
//! | [`collisions`] | reflect / kick-off / fall-off / burn-off / slow-down |
//! | [`stepping`]   | careful / transparent / push-soft / -hard / -train   |
//! | [`reporter`]   | `Reporter`, `Report`, resampling                     |
//! | [`error`]      | `SimError`, `SimResult`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rail_core::kind;
//! use rail_sim::{Collider, Particle, Simulation, collisions};
//!
//! let mut collider = Collider::new();
//! collider.register(kind::WALKER, kind::PARTICLE, collisions::reflect);
//!
//! let mut sim = Simulation::builder(100).collider(collider).mark_ends().build()?;
//! sim.load(Particle::walker(1.0))?;
//! sim.run(50.0)?;
//! println!("{} reports", sim.reporter.out.len());
//! ```

pub mod action;
pub mod builder;
pub mod collider;
pub mod collisions;
pub mod composite;
pub mod error;
pub mod event;
pub mod particle;
pub mod reporter;
pub mod sim;
pub mod stepping;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::{Action, DeferredFn};
pub use builder::SimBuilder;
pub use collider::{Collider, CollisionRule, IntoKinds, fuse};
pub use composite::Composite;
pub use error::{SimError, SimResult};
pub use event::Event;
pub use particle::{Life, Motion, Particle};
pub use reporter::{Report, ReportMode, Reporter, resample};
pub use sim::Simulation;
pub use stepping::SteppingRule;
pub use store::{AgentStore, Constituent};
