//! Bresenham synchronisation of secondary axes to the dominant step clock.

use super::descriptor::{Axis, AxisDeltas};

/// Set of axes that pulse on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSet(u8);

impl AxisSet {
    /// No axis.
    pub const EMPTY: Self = Self(0);

    /// Add an axis.
    #[inline]
    pub fn insert(&mut self, axis: Axis) {
        self.0 |= 1 << axis.index();
    }

    /// Whether an axis is in the set.
    #[inline]
    pub fn contains(self, axis: Axis) -> bool {
        self.0 & (1 << axis.index()) != 0
    }

    /// Whether no axis is in the set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of axes in the set.
    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }
}

/// One signed accumulator per axis.
///
/// Each tick subtracts the axis delta; when the accumulator goes negative the
/// axis steps and `total_steps` is added back. Starting from zero, every
/// accumulator stays within `[-total_steps, total_steps)` and an axis steps
/// exactly `|delta|` times over `total_steps` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCounters([i32; 4]);

impl AxisCounters {
    /// Current accumulator of one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> i32 {
        self.0[axis.index()]
    }

    /// Advance all accumulators by one dominant-axis tick.
    ///
    /// `total_steps` and every delta magnitude must fit in `i32`.
    pub fn advance(&mut self, deltas: &AxisDeltas, total_steps: u32) -> AxisSet {
        let total = total_steps as i32;
        let mut due = AxisSet::EMPTY;
        for axis in Axis::ALL {
            let counter = &mut self.0[axis.index()];
            *counter -= deltas.magnitude(axis) as i32;
            if *counter < 0 {
                due.insert(axis);
                *counter += total;
            }
        }
        due
    }
}
