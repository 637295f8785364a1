//! Error types for stepper-ramp.
//!
//! Only configuration loading and move preparation can fail. Once a move has
//! been created, `start` and `step` are infallible.

use core::fmt;

use crate::motion::Axis;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-ramp operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Move precondition violated while preparing a move
    Move(MoveError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Timer clock frequency is zero
    ZeroClock,
    /// An axis has a zero micrometre-per-step resolution
    ZeroAxisResolution(Axis),
    /// Distance scale is zero or not divisible by 3
    InvalidDistanceScale(u32),
    /// Timer clock is slower than one distance-scale divisor, so the clock factor is zero
    ClockTooSlow {
        /// Configured clock in Hz
        cpu_hz: u32,
        /// Divisor the clock must at least reach
        divisor: u32,
    },
    /// A tick count does not fit the 24.8 fixed-point range
    IntervalNotRepresentable(u32),
    /// Minimum interval is longer than the initial ramp interval
    MinIntervalAboveSteepness {
        /// Configured minimum interval in ticks
        min_interval: u32,
        /// Configured steepness in ticks
        steepness: u32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Move precondition violations.
///
/// These are programmer errors on the queue side: a move that trips one of
/// them must never reach the step interrupt.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveError {
    /// Move has no dominant-axis steps
    ZeroSteps,
    /// Requested feed rate is zero
    ZeroFeedRate,
    /// Step count is lower than the dominant axis delta or too large for the ramp index
    InvalidTotalSteps {
        /// Step count carried by the move
        total_steps: u32,
        /// Largest axis delta magnitude
        dominant: u32,
    },
    /// Estimated distance exceeds what the scaled arithmetic can represent
    DistanceOutOfRange {
        /// Estimated distance in micrometres
        distance_um: u64,
        /// Largest supported distance in micrometres
        max_um: u32,
    },
    /// Interval computation overflowed 32 bits
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Move(e) => write!(f, "Move error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ZeroClock => write!(f, "Timer clock must be > 0 Hz"),
            ConfigError::ZeroAxisResolution(axis) => {
                write!(f, "Axis {} resolution must be > 0 um per step", axis)
            }
            ConfigError::InvalidDistanceScale(v) => {
                write!(f, "Invalid distance scale: {}. Must be > 0 and divisible by 3", v)
            }
            ConfigError::ClockTooSlow { cpu_hz, divisor } => {
                write!(f, "Timer clock {} Hz is below the scale divisor {}", cpu_hz, divisor)
            }
            ConfigError::IntervalNotRepresentable(ticks) => {
                write!(f, "Interval of {} ticks does not fit 24.8 fixed point", ticks)
            }
            ConfigError::MinIntervalAboveSteepness { min_interval, steepness } => {
                write!(
                    f,
                    "Minimum interval ({} ticks) must not exceed steepness ({} ticks)",
                    min_interval, steepness
                )
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::ZeroSteps => write!(f, "Move has zero total steps"),
            MoveError::ZeroFeedRate => write!(f, "Move has zero feed rate"),
            MoveError::InvalidTotalSteps { total_steps, dominant } => {
                write!(
                    f,
                    "Total steps {} invalid for dominant axis delta {}",
                    total_steps, dominant
                )
            }
            MoveError::DistanceOutOfRange { distance_um, max_um } => {
                write!(f, "Move distance {} um exceeds maximum {} um", distance_um, max_um)
            }
            MoveError::Overflow => write!(f, "Step interval computation overflow"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MoveError> for Error {
    fn from(e: MoveError) -> Self {
        Error::Move(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}
