//! # stepper-ramp
//!
//! Step-timing core for multi-axis stepper motion.
//!
//! For every planned move the motion queue hands over a [`MoveDescriptor`].
//! An [`AccelerationStrategy`] turns it into the sequence of timer intervals
//! between consecutive steps of the dominant axis:
//!
//! - [`RampStrategy`]: trapezoidal ramp in 24.8 fixed point, using only
//!   integer arithmetic on the step path
//! - [`ConstantSpeed`]: one precomputed interval for the whole move
//!
//! ## Quick Start
//!
//! ```rust
//! use stepper_ramp::{
//!     AccelerationStrategy, AnyStrategy, AxisDeltas, FeedRate, MachineConfig, MoveDescriptor,
//! };
//!
//! let strategy = AnyStrategy::from_config(MachineConfig::default());
//! let mv = MoveDescriptor::new(AxisDeltas::new(800, 400, 0, 0), FeedRate(6000));
//!
//! let mut state = strategy.create(&mv)?;
//! let mut next = strategy.start(&state);
//! for _ in 0..mv.total_steps {
//!     // arm the timer with `next`, pulse, then:
//!     next = strategy.step(&mut state, &mv);
//! }
//! # let _ = next;
//! # Ok::<(), stepper_ramp::MoveError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;

// Re-exports for ergonomic API
pub use config::{
    validate_config, AxisResolution, MachineConfig, RampConfig, ScalingConfig, StrategyKind,
};
pub use error::{ConfigError, Error, MoveError, Result};
pub use motion::{
    AccelerationStrategy, AnyState, AnyStrategy, Axis, AxisDeltas, ConstantSpeed, FeedRate,
    Interval, MoveDescriptor, MoveSlot, RampPhase, RampState, RampStrategy,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Micrometers, UnitExt};
