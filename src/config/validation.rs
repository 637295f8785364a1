//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::{Axis, Interval};

use super::MachineConfig;

/// Validate a machine configuration.
///
/// Checks:
/// - Timer clock is non-zero and at least one scale divisor
/// - Distance scale is non-zero and divisible by 3
/// - Every axis has a non-zero resolution
/// - Steepness and minimum interval fit 24.8 and are ordered
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    if config.cpu_hz == 0 {
        return Err(Error::Config(ConfigError::ZeroClock));
    }

    validate_scaling(config)?;

    for axis in Axis::ALL {
        if config.axes.get(axis).0 == 0 {
            return Err(Error::Config(ConfigError::ZeroAxisResolution(axis)));
        }
    }

    validate_ramp(config)?;

    debug!(
        "config ok: clock_factor={} max_distance_um={}",
        config.clock_factor(),
        config.max_distance().0
    );

    Ok(())
}

fn validate_scaling(config: &MachineConfig) -> Result<()> {
    let scale = config.scaling.distance_scale;
    if scale == 0 || scale % 3 != 0 {
        return Err(Error::Config(ConfigError::InvalidDistanceScale(scale)));
    }

    // A zero clock factor would make every interval zero
    if config.clock_factor() == 0 {
        return Err(Error::Config(ConfigError::ClockTooSlow {
            cpu_hz: config.cpu_hz,
            divisor: config.scale_divisor(),
        }));
    }

    Ok(())
}

fn validate_ramp(config: &MachineConfig) -> Result<()> {
    let ramp = &config.ramp;

    for ticks in [ramp.steepness, ramp.min_interval] {
        if ticks == 0 || Interval::from_ticks(ticks).is_none() {
            return Err(Error::Config(ConfigError::IntervalNotRepresentable(ticks)));
        }
    }

    if ramp.min_interval > ramp.steepness {
        return Err(Error::Config(ConfigError::MinIntervalAboveSteepness {
            min_interval: ramp.min_interval,
            steepness: ramp.steepness,
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Micrometers;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MachineConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_axis_resolution() {
        let mut config = MachineConfig::default();
        config.axes.e = Micrometers(0);

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ZeroAxisResolution(Axis::E)))
        ));
    }

    #[test]
    fn test_scale_must_divide_by_three() {
        let mut config = MachineConfig::default();
        config.scaling.distance_scale = 2000;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidDistanceScale(2000)))
        ));
    }

    #[test]
    fn test_slow_clock_rejected() {
        let mut config = MachineConfig::default();
        config.cpu_hz = 32_768;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ClockTooSlow { divisor: 40_000, .. }))
        ));
    }

    #[test]
    fn test_steepness_must_fit_fixed_point() {
        let mut config = MachineConfig::default();
        config.ramp.steepness = Interval::MAX_TICKS + 1;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::IntervalNotRepresentable(_)))
        ));
    }

    #[test]
    fn test_min_interval_above_steepness() {
        let mut config = MachineConfig::default();
        config.ramp.min_interval = 600_000;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MinIntervalAboveSteepness { .. }))
        ));
    }
}
