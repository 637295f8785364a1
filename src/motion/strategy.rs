//! The acceleration strategy interface.

use core::fmt;

use crate::config::{MachineConfig, StrategyKind};
use crate::error::MoveError;

use super::constant::{ConstantSpeed, ConstantState};
use super::descriptor::MoveDescriptor;
use super::interval::Interval;
use super::ramp::{RampState, RampStrategy};

/// Step timing for one move, driven by the motion queue.
///
/// The queue calls [`create`](Self::create) once when it accepts a move,
/// [`start`](Self::start) once to arm the timer for the first step, and then
/// [`step`](Self::step) once per timer interrupt until `total_steps` steps
/// have been issued.
pub trait AccelerationStrategy {
    /// Per-move state owned by the move slot.
    type State: Clone + fmt::Debug;

    /// Precompute everything the interrupt path needs.
    ///
    /// Runs outside interrupt context and may be comparatively expensive.
    /// Calling it again for the same descriptor yields an identical state.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] for moves that violate a precondition. Such a
    /// move must not be started.
    fn create(&self, descriptor: &MoveDescriptor) -> Result<Self::State, MoveError>;

    /// Interval to wait before the first step.
    fn start(&self, state: &Self::State) -> Interval;

    /// Interval until the next step, after one step was taken.
    ///
    /// Bounded integer work only: no loops, no floating point, no division by
    /// a value that can be zero. Must not be called more than `total_steps`
    /// times per move.
    fn step(&self, state: &mut Self::State, descriptor: &MoveDescriptor) -> Interval;
}

/// Strategy chosen once from configuration.
#[derive(Debug, Clone)]
pub enum AnyStrategy {
    /// Trapezoidal ramp.
    Ramp(RampStrategy),
    /// Constant speed.
    ConstantSpeed(ConstantSpeed),
}

/// Per-move state of an [`AnyStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyState {
    /// Ramp state.
    Ramp(RampState),
    /// Constant-speed state.
    ConstantSpeed(ConstantState),
}

impl AnyStrategy {
    /// Build the strategy named by `config.strategy`.
    pub fn from_config(config: MachineConfig) -> Self {
        match config.strategy {
            StrategyKind::Ramp => AnyStrategy::Ramp(RampStrategy::new(config)),
            StrategyKind::ConstantSpeed => AnyStrategy::ConstantSpeed(ConstantSpeed::new(config)),
        }
    }

    /// Which variant is active.
    pub fn kind(&self) -> StrategyKind {
        match self {
            AnyStrategy::Ramp(_) => StrategyKind::Ramp,
            AnyStrategy::ConstantSpeed(_) => StrategyKind::ConstantSpeed,
        }
    }
}

impl AccelerationStrategy for AnyStrategy {
    type State = AnyState;

    fn create(&self, descriptor: &MoveDescriptor) -> Result<AnyState, MoveError> {
        match self {
            AnyStrategy::Ramp(s) => s.create(descriptor).map(AnyState::Ramp),
            AnyStrategy::ConstantSpeed(s) => s.create(descriptor).map(AnyState::ConstantSpeed),
        }
    }

    // Dispatch on the state; it carries everything start and step read.
    fn start(&self, state: &AnyState) -> Interval {
        match state {
            AnyState::Ramp(state) => state.interval(),
            AnyState::ConstantSpeed(state) => state.interval(),
        }
    }

    fn step(&self, state: &mut AnyState, descriptor: &MoveDescriptor) -> Interval {
        match state {
            AnyState::Ramp(state) => state.advance(descriptor.total_steps),
            AnyState::ConstantSpeed(state) => state.interval(),
        }
    }
}
