//! Move descriptors handed over by the motion queue.

use core::fmt;
use core::ops::{Index, IndexMut};

use serde::Deserialize;

use crate::error::MoveError;

/// Largest step count a move may carry.
///
/// Keeps the ramp index (`4 * total_steps`) and the Bresenham accumulators
/// inside `i32`.
pub const MAX_TOTAL_STEPS: u32 = (i32::MAX / 4) as u32;

/// Machine axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// First positional axis.
    X,
    /// Second positional axis.
    Y,
    /// Vertical axis.
    Z,
    /// Extruder or auxiliary axis.
    E,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

    /// Storage index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::E => 3,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::E => "E",
        };
        f.write_str(name)
    }
}

/// Signed per-axis step deltas of one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisDeltas(pub [i32; 4]);

impl AxisDeltas {
    /// Create deltas from individual axis values.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32, e: i32) -> Self {
        Self([x, y, z, e])
    }

    /// Absolute step count on one axis.
    #[inline]
    pub fn magnitude(&self, axis: Axis) -> u32 {
        self.0[axis.index()].unsigned_abs()
    }

    /// Whether an axis does not move.
    #[inline]
    pub fn is_stationary(&self, axis: Axis) -> bool {
        self.0[axis.index()] == 0
    }

    /// Axis with the most steps. Ties resolve to the earlier axis.
    pub fn dominant(&self) -> Axis {
        let mut best = Axis::X;
        for axis in Axis::ALL {
            if self.magnitude(axis) > self.magnitude(best) {
                best = axis;
            }
        }
        best
    }
}

impl Index<Axis> for AxisDeltas {
    type Output = i32;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis.index()]
    }
}

impl IndexMut<Axis> for AxisDeltas {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        &mut self.0[axis.index()]
    }
}

/// Requested feed rate in millimetres per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct FeedRate(pub u32);

impl FeedRate {
    /// Create a new FeedRate value.
    #[inline]
    pub const fn new(mm_per_min: u32) -> Self {
        Self(mm_per_min)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// One planned move, read-only for the step-timing core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveDescriptor {
    /// Signed step delta per axis.
    pub deltas: AxisDeltas,

    /// Dominant-axis step count; the number of `step` calls for this move.
    pub total_steps: u32,

    /// Requested speed.
    pub feed_rate: FeedRate,

    /// Precomputed duration in scaled-distance ticks per step-minute.
    ///
    /// Divided by the feed rate this yields ticks per step. When `None` the
    /// strategies derive it from the estimated distance.
    pub move_duration: Option<u32>,
}

impl MoveDescriptor {
    /// Create a descriptor whose step clock is driven by the dominant axis.
    pub fn new(deltas: AxisDeltas, feed_rate: FeedRate) -> Self {
        Self {
            deltas,
            total_steps: deltas.magnitude(deltas.dominant()),
            feed_rate,
            move_duration: None,
        }
    }

    /// Override the dominant-axis step count.
    pub fn with_total_steps(mut self, total_steps: u32) -> Self {
        self.total_steps = total_steps;
        self
    }

    /// Attach a precomputed move duration.
    pub fn with_move_duration(mut self, move_duration: u32) -> Self {
        self.move_duration = Some(move_duration);
        self
    }

    /// Check the preconditions every strategy relies on.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::ZeroSteps`], [`MoveError::ZeroFeedRate`], or
    /// [`MoveError::InvalidTotalSteps`] when the step count is below the
    /// dominant delta or above [`MAX_TOTAL_STEPS`].
    pub fn validate(&self) -> Result<(), MoveError> {
        if self.total_steps == 0 {
            return Err(MoveError::ZeroSteps);
        }
        if self.feed_rate.0 == 0 {
            return Err(MoveError::ZeroFeedRate);
        }

        let dominant = self.deltas.magnitude(self.deltas.dominant());
        if self.total_steps < dominant || self.total_steps > MAX_TOTAL_STEPS {
            return Err(MoveError::InvalidTotalSteps {
                total_steps: self.total_steps,
                dominant,
            });
        }
        Ok(())
    }
}
