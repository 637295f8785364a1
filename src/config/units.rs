//! Unit types for physical quantities.
//!
//! Lengths are integer micrometres so distance estimation never touches
//! floating point.

use core::ops::{Add, Mul};

use serde::Deserialize;

use crate::motion::FeedRate;

/// Length in micrometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Micrometers(pub u32);

impl Micrometers {
    /// Create a new Micrometers value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Length covered by `steps` steps of this resolution, widened to avoid overflow.
    #[inline]
    pub fn for_steps(self, steps: u32) -> u64 {
        u64::from(self.0) * u64::from(steps)
    }
}

impl Add for Micrometers {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Micrometers {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Micrometers.
    fn um(self) -> Micrometers;
    /// Convert to FeedRate (mm/min).
    fn mm_per_min(self) -> FeedRate;
}

impl UnitExt for u32 {
    #[inline]
    fn um(self) -> Micrometers {
        Micrometers(self)
    }

    #[inline]
    fn mm_per_min(self) -> FeedRate {
        FeedRate(self)
    }
}
