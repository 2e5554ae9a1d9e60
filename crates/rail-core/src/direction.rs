//! The two ways along a one-dimensional track.

use std::fmt;
use std::ops::Neg;

use crate::SimRng;

/// Direction of motion on the track.
///
/// Stored as a signed unit so position arithmetic is `pos + dir.delta()`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i8)]
pub enum Direction {
    /// Towards smaller positions.
    Back = -1,
    /// Towards larger positions.
    Fwd = 1,
}

impl Direction {
    /// The signed cell offset of one step in this direction.
    #[inline(always)]
    pub fn delta(self) -> i64 {
        self as i8 as i64
    }

    /// The opposite direction.
    #[inline(always)]
    pub fn flip(self) -> Direction {
        match self {
            Direction::Back => Direction::Fwd,
            Direction::Fwd => Direction::Back,
        }
    }

    /// Draw a uniformly random direction.
    pub fn random(rng: &mut SimRng) -> Direction {
        if rng.gen_bool(0.5) { Direction::Fwd } else { Direction::Back }
    }
}

impl Neg for Direction {
    type Output = Direction;
    #[inline(always)]
    fn neg(self) -> Direction {
        self.flip()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Back => write!(f, "-1"),
            Direction::Fwd => write!(f, "+1"),
        }
    }
}
