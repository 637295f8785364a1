//! Machine configuration - root configuration structure.

use serde::Deserialize;

use crate::motion::{Axis, Interval};

use super::units::Micrometers;

/// Which acceleration strategy drives every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Trapezoidal ramp-up / cruise / ramp-down.
    #[default]
    Ramp,
    /// Single precomputed interval for the whole move.
    ConstantSpeed,
}

/// Ramp shape and step-rate ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RampConfig {
    /// Interval of the first step of every ramp, in timer ticks.
    ///
    /// Larger values give a gentler acceleration.
    #[serde(rename = "steepness_ticks")]
    pub steepness: u32,

    /// Shortest interval the drivers can follow, in timer ticks.
    #[serde(rename = "min_interval_ticks")]
    pub min_interval: u32,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            steepness: 500_000,
            min_interval: 200,
        }
    }
}

/// Fixed-point scaling used when turning distance into ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScalingConfig {
    /// Multiplier applied to the distance before dividing by the step count.
    ///
    /// Bounds the longest move to `u32::MAX / distance_scale` micrometres.
    #[serde(default = "default_distance_scale")]
    pub distance_scale: u32,
}

fn default_distance_scale() -> u32 {
    2400
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            distance_scale: default_distance_scale(),
        }
    }
}

/// Distance covered by one step on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AxisResolution {
    /// X micrometres per step.
    pub x: Micrometers,
    /// Y micrometres per step.
    pub y: Micrometers,
    /// Z micrometres per step.
    pub z: Micrometers,
    /// E micrometres per step.
    pub e: Micrometers,
}

impl AxisResolution {
    /// Resolution of one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> Micrometers {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::E => self.e,
        }
    }
}

impl Default for AxisResolution {
    fn default() -> Self {
        // 80 steps/mm belts, 400 steps/mm leadscrew, 96 steps/mm extruder
        Self {
            x: Micrometers(12),
            y: Micrometers(12),
            z: Micrometers(2),
            e: Micrometers(10),
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MachineConfig {
    /// Step timer clock in Hz.
    #[serde(default = "default_cpu_hz")]
    pub cpu_hz: u32,

    /// Strategy used for every move.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Ramp parameters.
    #[serde(default)]
    pub ramp: RampConfig,

    /// Distance scaling.
    #[serde(default)]
    pub scaling: ScalingConfig,

    /// Per-axis resolution.
    #[serde(default)]
    pub axes: AxisResolution,
}

fn default_cpu_hz() -> u32 {
    16_000_000
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            cpu_hz: default_cpu_hz(),
            strategy: StrategyKind::default(),
            ramp: RampConfig::default(),
            scaling: ScalingConfig::default(),
            axes: AxisResolution::default(),
        }
    }
}

impl MachineConfig {
    /// Divisor turning the clock into ticks per scaled distance unit.
    ///
    /// `distance_scale * 1000 / 60`, i.e. 40000 for the default scale.
    #[inline]
    pub fn scale_divisor(&self) -> u32 {
        (self.scaling.distance_scale / 3).saturating_mul(50)
    }

    /// Ticks per scaled distance unit per step-minute.
    #[inline]
    pub fn clock_factor(&self) -> u32 {
        match self.scale_divisor() {
            0 => 0,
            divisor => self.cpu_hz / divisor,
        }
    }

    /// Longest move the scaled arithmetic can represent.
    #[inline]
    pub fn max_distance(&self) -> Micrometers {
        Micrometers(u32::MAX / self.scaling.distance_scale.max(1))
    }

    /// First interval of every ramp.
    #[inline]
    pub fn steepness_interval(&self) -> Interval {
        Interval::from_ticks(self.ramp.steepness).unwrap_or(Interval::MAX)
    }

    /// Hardware floor for the cruise interval.
    #[inline]
    pub fn min_interval(&self) -> Interval {
        Interval::from_ticks(self.ramp.min_interval).unwrap_or(Interval::MAX)
    }
}
