//! Constant-speed strategy.
//!
//! Every step of a move uses the cruise interval derived from the move's
//! distance and feed rate. There is no ramp and no hardware floor, so the
//! queue must only plan feed rates the drivers can follow.

use crate::config::MachineConfig;
use crate::error::MoveError;

use super::descriptor::MoveDescriptor;
use super::distance::{DistanceApproximator, OctagonalApproximator};
use super::interval::Interval;
use super::strategy::AccelerationStrategy;
use super::timing::CruiseTiming;

/// Per-move constant-speed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConstantState {
    interval: Interval,
}

impl ConstantState {
    /// Interval used for every step.
    #[inline]
    pub fn interval(&self) -> Interval {
        self.interval
    }
}

/// Fixed step rate for the whole move.
#[derive(Debug, Clone)]
pub struct ConstantSpeed<D = OctagonalApproximator> {
    config: MachineConfig,
    approx: D,
}

impl ConstantSpeed {
    /// Create a constant-speed strategy using the default distance estimate.
    pub fn new(config: MachineConfig) -> Self {
        Self::with_approximator(config, OctagonalApproximator)
    }
}

impl<D: DistanceApproximator> ConstantSpeed<D> {
    /// Create a constant-speed strategy with a custom distance estimate.
    pub fn with_approximator(config: MachineConfig, approx: D) -> Self {
        Self { config, approx }
    }

    /// Machine configuration in use.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl<D: DistanceApproximator> AccelerationStrategy for ConstantSpeed<D> {
    type State = ConstantState;

    fn create(&self, descriptor: &MoveDescriptor) -> Result<ConstantState, MoveError> {
        let timing = CruiseTiming::derive(descriptor, &self.config, &self.approx)?;
        debug!(
            "constant: total_steps={} interval={}",
            descriptor.total_steps,
            timing.interval.raw()
        );
        Ok(ConstantState {
            interval: timing.interval,
        })
    }

    fn start(&self, state: &ConstantState) -> Interval {
        state.interval
    }

    fn step(&self, state: &mut ConstantState, _descriptor: &MoveDescriptor) -> Interval {
        state.interval
    }
}
