//! Distance and feed rate to cruise interval.
//!
//! The interval is derived as
//!
//! ```text
//! duration = (distance_um * distance_scale / total_steps) * clock_factor
//! interval = (duration / feed_rate) << 8
//! ```
//!
//! `distance_scale * clock_factor == cpu_hz * 60 / 1000`, so `duration` is
//! "ticks per step" at one mm/min. Dividing before multiplying loses a little
//! precision but keeps every intermediate inside `u32` for moves up to
//! `u32::MAX / distance_scale` micrometres (about 1.79 m at the default 2400).
//! Both strategies derive their steady-state interval here so the scale is
//! applied identically everywhere.

use crate::config::{MachineConfig, Micrometers};
use crate::error::MoveError;

use super::descriptor::MoveDescriptor;
use super::distance::{move_distance, DistanceApproximator};
use super::interval::Interval;

/// Steady-state timing of one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CruiseTiming {
    /// Estimated move length.
    pub distance: Micrometers,

    /// Ticks per step at 1 mm/min, scaled.
    pub duration: u32,

    /// Interval at the requested feed rate.
    pub interval: Interval,
}

impl CruiseTiming {
    /// Derive the timing of a move.
    ///
    /// A `move_duration` carried by the descriptor takes precedence over the
    /// one derived from the distance estimate.
    ///
    /// # Errors
    ///
    /// Fails if the descriptor violates a precondition, the distance exceeds
    /// the configured bound, or the interval does not fit 24.8.
    pub fn derive<D: DistanceApproximator>(
        descriptor: &MoveDescriptor,
        config: &MachineConfig,
        approx: &D,
    ) -> Result<Self, MoveError> {
        descriptor.validate()?;

        let distance = move_distance(descriptor, &config.axes, approx, config.max_distance())?;
        let duration = match descriptor.move_duration {
            Some(duration) => duration,
            None => scaled_duration(distance, descriptor.total_steps, config)?,
        };
        let interval = Interval::from_ticks(duration / descriptor.feed_rate.0)
            .ok_or(MoveError::Overflow)?;

        trace!(
            "cruise: distance_um={} duration={} interval={}",
            distance.0,
            duration,
            interval.raw()
        );

        Ok(Self {
            distance,
            duration,
            interval,
        })
    }
}

/// Scaled duration of a move, see the module docs.
///
/// # Errors
///
/// Returns [`MoveError::Overflow`] if an intermediate exceeds `u32`.
pub fn scaled_duration(
    distance: Micrometers,
    total_steps: u32,
    config: &MachineConfig,
) -> Result<u32, MoveError> {
    if total_steps == 0 {
        return Err(MoveError::ZeroSteps);
    }

    distance
        .0
        .checked_mul(config.scaling.distance_scale)
        .map(|scaled| scaled / total_steps)
        .and_then(|per_step| per_step.checked_mul(config.clock_factor()))
        .ok_or(MoveError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{AxisDeltas, FeedRate, OctagonalApproximator};

    // 96 mm along X at 80 steps/mm
    fn x_move(feed: u32) -> MoveDescriptor {
        MoveDescriptor::new(AxisDeltas::new(8000, 0, 0, 0), FeedRate(feed))
    }

    #[test]
    fn test_scaled_duration() {
        let config = MachineConfig::default();
        // (96000 * 2400 / 8000) * 400
        assert_eq!(scaled_duration(Micrometers(96_000), 8000, &config), Ok(11_520_000));
    }

    #[test]
    fn test_cruise_interval() {
        let config = MachineConfig::default();
        let timing = CruiseTiming::derive(&x_move(3000), &config, &OctagonalApproximator).unwrap();

        assert_eq!(timing.distance, Micrometers(96_000));
        // 3840 ticks at 16 MHz = 240 us per step = 50 mm/s at 80 steps/mm
        assert_eq!(timing.interval, Interval::from_ticks(3840).unwrap());
    }

    #[test]
    fn test_precomputed_duration_wins() {
        let config = MachineConfig::default();
        let mv = x_move(3000).with_move_duration(6_000_000);
        let timing = CruiseTiming::derive(&mv, &config, &OctagonalApproximator).unwrap();

        assert_eq!(timing.duration, 6_000_000);
        assert_eq!(timing.interval.ticks(), 2000);
    }

    #[test]
    fn test_rejects_preconditions() {
        let config = MachineConfig::default();
        let result = CruiseTiming::derive(&x_move(0), &config, &OctagonalApproximator);
        assert_eq!(result, Err(MoveError::ZeroFeedRate));
    }

    #[test]
    fn test_overflowing_interval() {
        let config = MachineConfig::default();
        // Duration too long to shift into 24.8
        let mv = MoveDescriptor::new(AxisDeltas::new(1, 0, 0, 0), FeedRate(1))
            .with_move_duration(u32::MAX);
        let result = CruiseTiming::derive(&mv, &config, &OctagonalApproximator);
        assert_eq!(result, Err(MoveError::Overflow));
    }
}
