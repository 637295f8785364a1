//! 24.8 fixed-point step intervals.

use core::fmt;

/// Number of fractional bits in an [`Interval`].
pub const FRACTIONAL_BITS: u32 = 8;

const FRACTION_MASK: u32 = (1 << FRACTIONAL_BITS) - 1;

/// Time between two step pulses, in timer ticks with 8 fractional bits.
///
/// The raw value is `ticks * 256`. Consumers arming a hardware timer shift
/// right by [`FRACTIONAL_BITS`] (see [`Interval::ticks`]); the fraction is
/// kept so the ramp recurrence does not accumulate truncation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval(u32);

impl Interval {
    /// Largest whole tick count that survives the shift into 24.8.
    pub const MAX_TICKS: u32 = u32::MAX >> FRACTIONAL_BITS;

    /// Longest representable interval.
    pub const MAX: Self = Self(u32::MAX);

    /// Wrap an already-scaled 24.8 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Convert whole ticks into 24.8.
    ///
    /// Returns `None` if `ticks` exceeds [`Interval::MAX_TICKS`].
    #[inline]
    pub const fn from_ticks(ticks: u32) -> Option<Self> {
        if ticks > Self::MAX_TICKS {
            None
        } else {
            Some(Self(ticks << FRACTIONAL_BITS))
        }
    }

    /// Raw 24.8 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whole ticks, fraction discarded.
    #[inline]
    pub const fn ticks(self) -> u32 {
        self.0 >> FRACTIONAL_BITS
    }

    /// Whole ticks, rounded half up.
    #[inline]
    pub const fn ticks_rounded(self) -> u32 {
        ((self.0 as u64 + (1 << (FRACTIONAL_BITS - 1))) >> FRACTIONAL_BITS) as u32
    }

    /// Fractional part in 1/256 ticks.
    #[inline]
    pub const fn fraction(self) -> u32 {
        self.0 & FRACTION_MASK
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/256 ticks", self.ticks(), self.fraction())
    }
}
