//! Schedulable unit trait

use crate::ops::ScheduleOps;
use cadence_core::Result;

/// A unit that can be driven by the scheduler's tick pass.
///
/// Units run in descending priority order, ties in registration order.
/// `start_once` fires exactly once per registered lifetime, always before
/// the first `on_tick`. Both hooks receive a [`ScheduleOps`] queue: the
/// registry cannot be mutated while it is being iterated, so any
/// register/unregister/reprioritize a unit wants to perform goes through
/// the queue and is applied after the pass completes.
pub trait Schedulable {
    /// Called once, the first time the unit is known to a running scheduler
    fn start_once(&mut self, _ops: &mut ScheduleOps) -> Result<()> {
        Ok(())
    }

    /// Called once per due tick with the delta seconds this unit observed
    fn on_tick(&mut self, dt: f64, ops: &mut ScheduleOps) -> Result<()>;

    /// Human-readable name for this unit
    fn name(&self) -> &str;
}
