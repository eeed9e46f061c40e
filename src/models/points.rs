//! Score points stored as half-point units, so repeated scoring never drifts.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Tournament points. A win is 1 point, a draw (or bye) half a point.
///
/// Internally counts half-points as an integer, so sums are exact and
/// recomputing a score always lands on the same value. On the wire this is a
/// plain JSON number (`2`, `2.5`, ...).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Points(u32);

impl Points {
    pub const ZERO: Points = Points(0);
    pub const HALF: Points = Points(1);
    pub const ONE: Points = Points(2);

    /// Build from a raw half-point count.
    pub fn from_halves(halves: u32) -> Self {
        Points(halves)
    }

    /// Raw half-point count.
    pub fn halves(self) -> u32 {
        self.0
    }

    /// Subtraction that stops at zero (scores are never negative).
    pub fn saturating_sub(self, rhs: Points) -> Points {
        Points(self.0.saturating_sub(rhs.0))
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 += rhs.0;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Points {
        iter.fold(Points::ZERO, Add::add)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let halves = value * 2.0;
        if !(0.0..=f64::from(u32::MAX)).contains(&halves) || halves.fract() != 0.0 {
            return Err(D::Error::custom(
                "score must be a non-negative multiple of 0.5",
            ));
        }
        Ok(Points(halves as u32))
    }
}
