//! Trapezoidal ramp strategy.
//!
//! Accelerates from the configured steepness interval towards the cruise
//! interval, cruises, and decelerates so the last step lands on the move's
//! final step. Intervals follow the integer recurrence
//!
//! ```text
//! n    += 4
//! c    -= 2c / n
//! ```
//!
//! which approximates the `1/sqrt(step)` timing of constant acceleration
//! (D. Austin, "Generate stepper-motor speed profiles in real time").
//! Deceleration re-seeds `n` as `-2 - n`, which replays the acceleration curve
//! backwards.
//!
//! `n` starts at 1 and only ever moves by 4 or maps to `-2 - n`, so it stays
//! congruent to 1 mod 4 and can never be zero.

use crate::config::MachineConfig;
use crate::error::MoveError;

use super::bresenham::{AxisCounters, AxisSet};
use super::descriptor::MoveDescriptor;
use super::distance::{DistanceApproximator, OctagonalApproximator};
use super::interval::Interval;
use super::strategy::AccelerationStrategy;
use super::timing::CruiseTiming;

/// Phase of the ramp state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampPhase {
    /// Ramping up; the interval shrinks every step.
    Accelerating,
    /// At the minimum interval.
    Cruising,
    /// Ramping down; the interval grows every step.
    Decelerating,
}

/// Per-move ramp bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampState {
    /// Bresenham accumulators for X, Y, Z, E.
    counters: AxisCounters,

    /// Step index at which deceleration begins.
    ramp_steps: u32,

    /// Steps already issued.
    step_no: u32,

    /// Current interval.
    c: Interval,

    /// Cruise interval, never below the hardware floor.
    c_min: Interval,

    /// Recurrence index.
    n: i32,

    /// State machine position.
    phase: RampPhase,

    /// Whether `c_min` was raised to the hardware floor.
    clamped: bool,
}

impl RampState {
    /// Current interval.
    #[inline]
    pub fn interval(&self) -> Interval {
        self.c
    }

    /// Cruise interval.
    #[inline]
    pub fn min_interval(&self) -> Interval {
        self.c_min
    }

    /// Whether the requested speed exceeded the hardware ceiling.
    #[inline]
    pub fn min_interval_clamped(&self) -> bool {
        self.clamped
    }

    /// Steps already issued.
    #[inline]
    pub fn step_no(&self) -> u32 {
        self.step_no
    }

    /// Step index at which deceleration begins.
    #[inline]
    pub fn ramp_steps(&self) -> u32 {
        self.ramp_steps
    }

    /// Recurrence index.
    #[inline]
    pub fn n(&self) -> i32 {
        self.n
    }

    /// State machine position.
    #[inline]
    pub fn phase(&self) -> RampPhase {
        self.phase
    }

    /// Bresenham accumulators.
    #[inline]
    pub fn counters(&self) -> &AxisCounters {
        &self.counters
    }

    /// Run the state machine for one step and return the next interval.
    pub(crate) fn advance(&mut self, total_steps: u32) -> Interval {
        debug_assert!(self.step_no < total_steps, "step past the end of the move");

        if self.phase != RampPhase::Decelerating && self.step_no >= self.ramp_steps {
            self.phase = RampPhase::Decelerating;
            self.n = -2 - self.n;
        }

        if self.phase != RampPhase::Cruising {
            self.n += 4;

            let c = i64::from(self.c.raw());
            let next = c - (2 * c) / i64::from(self.n);
            let next = u32::try_from(next.max(0)).unwrap_or(u32::MAX);

            if next <= self.c_min.raw() {
                self.c = self.c_min;
                self.phase = RampPhase::Cruising;
                // Leave exactly as many steps for ramping down as were spent ramping up
                self.ramp_steps = total_steps - self.step_no;
            } else {
                self.c = Interval::from_raw(next);
            }
        }

        self.step_no += 1;
        self.c
    }

    /// Axes that pulse on the current tick.
    ///
    /// Call once per issued step, alongside the strategy's `step`.
    pub fn advance_axes(&mut self, descriptor: &MoveDescriptor) -> AxisSet {
        self.counters.advance(&descriptor.deltas, descriptor.total_steps)
    }
}

/// Trapezoidal acceleration in 24.8 fixed point.
#[derive(Debug, Clone)]
pub struct RampStrategy<D = OctagonalApproximator> {
    config: MachineConfig,
    approx: D,
}

impl RampStrategy {
    /// Create a ramp strategy using the default distance estimate.
    pub fn new(config: MachineConfig) -> Self {
        Self::with_approximator(config, OctagonalApproximator)
    }
}

impl<D: DistanceApproximator> RampStrategy<D> {
    /// Create a ramp strategy with a custom distance estimate.
    pub fn with_approximator(config: MachineConfig, approx: D) -> Self {
        Self { config, approx }
    }

    /// Machine configuration in use.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl<D: DistanceApproximator> AccelerationStrategy for RampStrategy<D> {
    type State = RampState;

    fn create(&self, descriptor: &MoveDescriptor) -> Result<RampState, MoveError> {
        let timing = CruiseTiming::derive(descriptor, &self.config, &self.approx)?;

        let floor = self.config.min_interval();
        let clamped = timing.interval < floor;
        let c_min = timing.interval.max(floor);
        if clamped {
            warn!(
                "cruise interval {} below floor {}, clamped",
                timing.interval.raw(),
                floor.raw()
            );
        }

        // The steepness interval seeds the ramp; a move slower than that
        // starts directly at its cruise interval.
        let c = self.config.steepness_interval().max(c_min);

        let total = descriptor.total_steps;
        let state = RampState {
            counters: AxisCounters::default(),
            ramp_steps: total / 2 + total % 2,
            step_no: 0,
            c,
            c_min,
            n: 1,
            phase: RampPhase::Accelerating,
            clamped,
        };

        debug!(
            "ramp: total_steps={} c={} c_min={}",
            total,
            c.raw(),
            c_min.raw()
        );

        Ok(state)
    }

    fn start(&self, state: &RampState) -> Interval {
        state.c
    }

    fn step(&self, state: &mut RampState, descriptor: &MoveDescriptor) -> Interval {
        state.advance(descriptor.total_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RampConfig;
    use crate::motion::{AxisDeltas, FeedRate};

    fn test_config() -> MachineConfig {
        MachineConfig {
            ramp: RampConfig {
                steepness: 20_000,
                min_interval: 200,
            },
            ..MachineConfig::default()
        }
    }

    // X-only move whose cruise interval is `cruise_ticks`
    fn test_move(total_steps: i32, cruise_ticks: u32) -> MoveDescriptor {
        MoveDescriptor::new(AxisDeltas::new(total_steps, 0, 0, 0), FeedRate(1000))
            .with_move_duration(cruise_ticks * 1000)
    }

    fn run(strategy: &RampStrategy, mv: &MoveDescriptor) -> (RampState, Vec<(Interval, RampPhase)>) {
        let mut state = strategy.create(mv).unwrap();
        let mut trace = Vec::new();
        for _ in 0..mv.total_steps {
            let c = strategy.step(&mut state, mv);
            trace.push((c, state.phase()));
        }
        (state, trace)
    }

    fn count(trace: &[(Interval, RampPhase)], phase: RampPhase) -> usize {
        trace.iter().filter(|(_, p)| *p == phase).count()
    }

    #[test]
    fn test_create_initial_state() {
        let strategy = RampStrategy::new(test_config());
        let state = strategy.create(&test_move(101, 2000)).unwrap();

        assert_eq!(state.ramp_steps(), 51);
        assert_eq!(state.step_no(), 0);
        assert_eq!(state.n(), 1);
        assert_eq!(state.phase(), RampPhase::Accelerating);
        assert_eq!(strategy.start(&state), Interval::from_ticks(20_000).unwrap());
        assert_eq!(state.min_interval(), Interval::from_ticks(2000).unwrap());
        assert!(!state.min_interval_clamped());
    }

    #[test]
    fn test_create_is_idempotent() {
        let strategy = RampStrategy::new(test_config());
        let mv = test_move(500, 3000);
        assert_eq!(strategy.create(&mv), strategy.create(&mv));
    }

    #[test]
    fn test_first_steps_follow_recurrence() {
        let strategy = RampStrategy::new(test_config());
        let mv = test_move(100, 2000);
        let mut state = strategy.create(&mv).unwrap();

        // c0 = 5_120_000; c1 = c0 - 2c0/5; c2 = c1 - 2c1/9
        assert_eq!(strategy.step(&mut state, &mv).raw(), 3_072_000);
        assert_eq!(strategy.step(&mut state, &mv).raw(), 2_389_334);
        assert_eq!(strategy.step(&mut state, &mv).raw(), 2_021_745);
        assert_eq!(state.n(), 13);
    }

    #[test]
    fn test_triangle_profile_hundred_steps() {
        let strategy = RampStrategy::new(test_config());
        let mv = test_move(100, 2000);
        let mut state = strategy.create(&mv).unwrap();
        assert_eq!(state.ramp_steps(), 50);

        for _ in 0..50 {
            strategy.step(&mut state, &mv);
        }
        assert_eq!(state.phase(), RampPhase::Accelerating);
        assert_eq!(state.step_no(), state.ramp_steps());

        strategy.step(&mut state, &mv);
        assert_eq!(state.phase(), RampPhase::Decelerating);

        for _ in 51..100 {
            strategy.step(&mut state, &mv);
        }
        assert_eq!(state.step_no(), 100);
        assert_eq!(state.phase(), RampPhase::Decelerating);
    }

    #[test]
    fn test_trapezoid_profile_reaches_cruise() {
        let strategy = RampStrategy::new(test_config());
        let mv = test_move(100, 3000);
        let (state, trace) = run(&strategy, &mv);

        assert_eq!(count(&trace, RampPhase::Accelerating), 23);
        assert_eq!(count(&trace, RampPhase::Cruising), 54);
        assert_eq!(count(&trace, RampPhase::Decelerating), 23);

        // The clamping step moved the deceleration point
        assert_eq!(state.ramp_steps(), 77);
        assert_eq!(state.step_no(), 100);

        let fastest = trace.iter().map(|(c, _)| *c).min().unwrap();
        assert_eq!(fastest, Interval::from_ticks(3000).unwrap());
    }

    #[test]
    fn test_cruise_interval_is_constant() {
        let strategy = RampStrategy::new(test_config());
        let (_, trace) = run(&strategy, &test_move(400, 3000));

        let cruise = Interval::from_ticks(3000).unwrap();
        assert!(trace
            .iter()
            .filter(|(_, p)| *p == RampPhase::Cruising)
            .all(|(c, _)| *c == cruise));
    }

    #[test]
    fn test_single_step_move() {
        let strategy = RampStrategy::new(test_config());
        let mv = test_move(1, 2000);
        let mut state = strategy.create(&mv).unwrap();

        assert_eq!(state.ramp_steps(), 1);
        assert_eq!(strategy.start(&state).raw(), 5_120_000);
        assert_eq!(strategy.step(&mut state, &mv).raw(), 3_072_000);
        assert_eq!(state.step_no(), 1);
        assert_eq!(state.phase(), RampPhase::Accelerating);
    }

    #[test]
    fn test_two_step_move_turns_immediately() {
        let strategy = RampStrategy::new(test_config());
        let (_, trace) = run(&strategy, &test_move(2, 2000));

        assert_eq!(trace[0], (Interval::from_raw(3_072_000), RampPhase::Accelerating));
        assert_eq!(trace[1], (Interval::from_raw(5_120_000), RampPhase::Decelerating));
    }

    #[test]
    fn test_min_interval_clamped_to_floor() {
        let strategy = RampStrategy::new(test_config());
        // 50 ticks requested, floor is 200
        let state = strategy.create(&test_move(1000, 50)).unwrap();

        assert!(state.min_interval_clamped());
        assert_eq!(state.min_interval(), Interval::from_ticks(200).unwrap());
    }

    #[test]
    fn test_slow_move_starts_at_cruise() {
        let strategy = RampStrategy::new(test_config());
        // Cruise is slower than the steepness interval
        let mv = test_move(50, 30_000);
        let cruise = Interval::from_ticks(30_000).unwrap();

        let state = strategy.create(&mv).unwrap();
        assert_eq!(strategy.start(&state), cruise);

        let (state, trace) = run(&strategy, &mv);
        assert!(trace.iter().all(|(c, _)| *c == cruise));
        assert_eq!(state.phase(), RampPhase::Cruising);
    }

    #[test]
    fn test_axes_follow_dominant_clock() {
        let strategy = RampStrategy::new(test_config());
        let mv = MoveDescriptor::new(AxisDeltas::new(300, -100, 0, 30), FeedRate(3000));
        let mut state = strategy.create(&mv).unwrap();

        let mut pulses = [0u32; 4];
        for _ in 0..mv.total_steps {
            strategy.step(&mut state, &mv);
            let due = state.advance_axes(&mv);
            for axis in crate::motion::Axis::ALL {
                if due.contains(axis) {
                    pulses[axis.index()] += 1;
                }
            }
        }
        assert_eq!(pulses, [300, 100, 0, 30]);
    }

    #[test]
    fn test_create_rejects_zero_feed_rate() {
        let strategy = RampStrategy::new(test_config());
        let mv = MoveDescriptor::new(AxisDeltas::new(10, 0, 0, 0), FeedRate(0));
        assert_eq!(strategy.create(&mv), Err(MoveError::ZeroFeedRate));
    }
}
