//! Configuration module for stepper-ramp.
//!
//! Provides the machine constants consumed by the step-timing strategies,
//! loaded from TOML files (with `std` feature) or built in code.

mod machine;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use machine::{AxisResolution, MachineConfig, RampConfig, ScalingConfig, StrategyKind};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::Micrometers;
