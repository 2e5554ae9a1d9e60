//! The simulation's random-number source.
//!
//! # Determinism strategy
//!
//! The engine is single-threaded, so one generator per simulation suffices:
//! it is owned by the simulation and threaded through the handlers that need
//! randomness (random placement, direction draws, random-walker inversions).
//! Seed it once via [`SimRng::seeded`] and a run is bit-for-bit reproducible;
//! [`SimRng::from_entropy`] is the convenience default for exploratory runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable simulation-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Deterministic generator from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy; runs are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`rng.inner().sample(...)` etc.).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
