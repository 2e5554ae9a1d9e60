//! `rail-track` — the playing field of a railsim simulation.
//!
//! A [`Track`] is a fixed-length 1D lattice of *cells*, each holding any
//! number of agent ids.  Reads are bounds-safe: a cell outside the track is
//! simply empty, so neighbor queries near the ends need no special casing.

pub mod track;

#[cfg(test)]
mod tests;

pub use track::Track;
