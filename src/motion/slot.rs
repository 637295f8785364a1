//! Move slot type-state.
//!
//! A slot owns one move and its strategy state. It is created `Pending` by the
//! queue, may be re-created any number of times while still pending, and turns
//! `Running` exactly once when its first interval is taken. From then on only
//! `step` is available, and only `total_steps` times.

use core::marker::PhantomData;

use crate::error::MoveError;

use super::descriptor::MoveDescriptor;
use super::interval::Interval;
use super::strategy::AccelerationStrategy;

/// Move has been prepared but not handed to the step interrupt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending;

/// Move is owned by the step interrupt.
#[derive(Debug, Clone, Copy)]
pub struct Running;

/// Trait for slot phases.
pub trait SlotPhase: private::Sealed {}

impl SlotPhase for Pending {}
impl SlotPhase for Running {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Pending {}
    impl Sealed for super::Running {}
}

/// One queued move and the state of its strategy.
#[derive(Debug)]
pub struct MoveSlot<'s, S: AccelerationStrategy, P: SlotPhase = Pending> {
    strategy: &'s S,
    descriptor: MoveDescriptor,
    state: S::State,
    issued: u32,
    _phase: PhantomData<P>,
}

impl<'s, S: AccelerationStrategy> MoveSlot<'s, S, Pending> {
    /// Prepare a move.
    ///
    /// # Errors
    ///
    /// Propagates the strategy's [`MoveError`]; no slot exists for a rejected move.
    pub fn create(strategy: &'s S, descriptor: MoveDescriptor) -> Result<Self, MoveError> {
        let state = strategy.create(&descriptor)?;
        Ok(Self {
            strategy,
            descriptor,
            state,
            issued: 0,
            _phase: PhantomData,
        })
    }

    /// Prepare the move again, e.g. after the queue replanned it.
    ///
    /// On error the slot keeps its previous state.
    pub fn recreate(&mut self, descriptor: MoveDescriptor) -> Result<(), MoveError> {
        self.state = self.strategy.create(&descriptor)?;
        self.descriptor = descriptor;
        Ok(())
    }

    /// Hand the move to the step interrupt and return the first interval.
    pub fn start(self) -> (Interval, MoveSlot<'s, S, Running>) {
        let first = self.strategy.start(&self.state);
        (
            first,
            MoveSlot {
                strategy: self.strategy,
                descriptor: self.descriptor,
                state: self.state,
                issued: self.issued,
                _phase: PhantomData,
            },
        )
    }
}

impl<'s, S: AccelerationStrategy> MoveSlot<'s, S, Running> {
    /// Record one step and return the interval until the next.
    ///
    /// Returns `None` once `total_steps` steps have been issued.
    pub fn step(&mut self) -> Option<Interval> {
        if self.is_complete() {
            return None;
        }
        let next = self.strategy.step(&mut self.state, &self.descriptor);
        self.issued += 1;
        Some(next)
    }

    /// Whether every step has been issued.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.issued >= self.descriptor.total_steps
    }

    /// Steps not yet issued.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.descriptor.total_steps - self.issued
    }

    /// Mutable strategy state, e.g. for axis synchronisation.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S::State {
        &mut self.state
    }
}

impl<'s, S: AccelerationStrategy, P: SlotPhase> MoveSlot<'s, S, P> {
    /// The move this slot carries.
    #[inline]
    pub fn descriptor(&self) -> &MoveDescriptor {
        &self.descriptor
    }

    /// Strategy state.
    #[inline]
    pub fn state(&self) -> &S::State {
        &self.state
    }

    /// Steps issued so far.
    #[inline]
    pub fn steps_issued(&self) -> u32 {
        self.issued
    }
}
