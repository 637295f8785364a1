//! Fast integer distance estimation.
//!
//! Moves that change more than one axis need a Euclidean length to turn a
//! feed rate into a step rate. A square root is too expensive for the
//! planner, so the estimate comes from a [`DistanceApproximator`].

use crate::config::{AxisResolution, Micrometers};
use crate::error::MoveError;

use super::descriptor::{Axis, MoveDescriptor};

/// Below this many micrometres a move is treated as extrusion-only.
pub const EXTRUDE_ONLY_THRESHOLD: Micrometers = Micrometers(2);

/// Approximate Euclidean length from per-axis magnitudes in micrometres.
pub trait DistanceApproximator {
    /// Length of a planar move.
    fn approx_2d(&self, dx: u64, dy: u64) -> u64;

    /// Length of a spatial move.
    fn approx_3d(&self, dx: u64, dy: u64, dz: u64) -> u64;
}

/// Octagonal min/max estimate with 10-bit weights.
///
/// Exact when only one axis moves. Planar estimates stay within 4% of the
/// true length, spatial ones within 5%. Rounds to nearest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctagonalApproximator;

impl DistanceApproximator for OctagonalApproximator {
    fn approx_2d(&self, dx: u64, dy: u64) -> u64 {
        let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
        if min == 0 {
            return max;
        }

        let mut approx = max * 1007 + min * 441;
        if max < (min << 4) {
            approx -= max * 40;
        }
        (approx + 512) >> 10
    }

    fn approx_3d(&self, dx: u64, dy: u64, dz: u64) -> u64 {
        // Fold the two shortest legs first
        let mut sorted = [dx, dy, dz];
        sorted.sort_unstable();
        let [min, med, max] = sorted;
        self.approx_2d(self.approx_2d(min, med), max)
    }
}

/// Estimated length of a move.
///
/// Planar moves use the 2-D estimate, pure Z moves are exact, everything else
/// uses the 3-D estimate. A move with no translational component is measured
/// along E.
///
/// # Errors
///
/// Returns [`MoveError::DistanceOutOfRange`] if the length exceeds
/// `max_distance`.
pub fn move_distance<D: DistanceApproximator>(
    descriptor: &MoveDescriptor,
    axes: &AxisResolution,
    approx: &D,
    max_distance: Micrometers,
) -> Result<Micrometers, MoveError> {
    let deltas = &descriptor.deltas;
    let length = |axis: Axis| axes.get(axis).for_steps(deltas.magnitude(axis));

    // Keeps the weighted sums of the estimators well inside u64
    if let Some(axis) = Axis::ALL.into_iter().find(|&a| length(a) > u64::from(u32::MAX)) {
        return Err(MoveError::DistanceOutOfRange {
            distance_um: length(axis),
            max_um: max_distance.0,
        });
    }

    let mut distance = if deltas.is_stationary(Axis::Z) {
        approx.approx_2d(length(Axis::X), length(Axis::Y))
    } else if deltas.is_stationary(Axis::X) && deltas.is_stationary(Axis::Y) {
        length(Axis::Z)
    } else {
        approx.approx_3d(length(Axis::X), length(Axis::Y), length(Axis::Z))
    };

    if distance < u64::from(EXTRUDE_ONLY_THRESHOLD.0) {
        distance = length(Axis::E);
    }

    match u32::try_from(distance) {
        Ok(um) if um <= max_distance.0 => Ok(Micrometers(um)),
        _ => Err(MoveError::DistanceOutOfRange {
            distance_um: distance,
            max_um: max_distance.0,
        }),
    }
}
