//! Motion module for stepper-ramp.
//!
//! Turns queued moves into per-step timer intervals.

mod bresenham;
mod constant;
mod descriptor;
mod distance;
mod interval;
mod ramp;
mod slot;
mod strategy;
mod timing;

pub use bresenham::{AxisCounters, AxisSet};
pub use constant::{ConstantSpeed, ConstantState};
pub use descriptor::{Axis, AxisDeltas, FeedRate, MoveDescriptor, MAX_TOTAL_STEPS};
pub use distance::{move_distance, DistanceApproximator, OctagonalApproximator, EXTRUDE_ONLY_THRESHOLD};
pub use interval::{Interval, FRACTIONAL_BITS};
pub use ramp::{RampPhase, RampState, RampStrategy};
pub use slot::{MoveSlot, Pending, Running, SlotPhase};
pub use strategy::{AccelerationStrategy, AnyState, AnyStrategy};
pub use timing::{scaled_duration, CruiseTiming};
