//! The scheduler: ordered registry, deferred mutation, tick pass
//!
//! One `Scheduler` instance is owned by the host application and driven by
//! its frame loop, one `tick` per frame. Registered units run in descending
//! priority order (ties in registration order) whenever their timing policy
//! says they are due. During the pass the registry is read-only; mutations
//! requested by running units go through [`ScheduleOps`] and are applied in
//! FIFO order immediately after the pass, before the clock advances.

use crate::ops::{PendingOp, ScheduleOps};
use crate::policy::TimingPolicy;
use crate::snapshot::{SchedulerSnapshot, UnitSnapshot};
use crate::timing::TimingState;
use crate::unit::Schedulable;
use cadence_core::{CadenceError, Result, UnitId};
use std::sync::Arc;

/// One registry slot: a unit plus its policy and timing bookkeeping
struct Entry {
    id: UnitId,
    unit: Box<dyn Schedulable>,
    policy: Arc<TimingPolicy>,
    state: TimingState,
}

/// Priority-ordered per-frame update scheduler.
///
/// Owns the registry, the deferred-op queue, and the tick clock. All methods
/// are synchronous and single-threaded; "concurrency" here is reentrancy,
/// handled by routing in-tick mutations through the op queue.
pub struct Scheduler {
    /// Sorted descending by priority, ties in registration order
    registry: Vec<Entry>,
    ops: ScheduleOps,
    tick_index: u64,
    elapsed_seconds: f64,
    running: bool,
    /// Wall time supplied to the most recent tick
    last_wall_time: Option<f64>,
    /// Wall delta between the two most recent ticks, used for seeding
    frame_delta: f64,
    /// True once the first tick pass has completed
    ticked_once: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty, running scheduler
    pub fn new() -> Self {
        Self {
            registry: Vec::new(),
            ops: ScheduleOps::new(),
            tick_index: 0,
            elapsed_seconds: 0.0,
            running: true,
            last_wall_time: None,
            frame_delta: 0.0,
            ticked_once: false,
        }
    }

    /// Register a unit under a timing policy, returning its handle.
    ///
    /// If the scheduler has already completed a tick, the unit's
    /// `start_once` hook fires here; otherwise it fires at the top of the
    /// first tick pass. Either way it precedes the first `on_tick`.
    pub fn register(
        &mut self,
        unit: Box<dyn Schedulable>,
        policy: Arc<TimingPolicy>,
    ) -> Result<UnitId> {
        let id = UnitId::new();
        self.apply_register(id, unit, policy)?;
        Ok(id)
    }

    /// Register a unit under the default every-tick policy
    pub fn register_default(&mut self, unit: Box<dyn Schedulable>) -> Result<UnitId> {
        self.register(unit, Arc::new(TimingPolicy::default()))
    }

    /// Register a batch of pre-existing units in one pass (bulk discovery).
    /// Input order is irrelevant; the registry normalizes to priority order.
    pub fn register_batch(
        &mut self,
        units: Vec<(Box<dyn Schedulable>, Arc<TimingPolicy>)>,
    ) -> Result<Vec<UnitId>> {
        let mut ids = Vec::with_capacity(units.len());
        for (unit, policy) in units {
            ids.push(self.register(unit, policy)?);
        }
        Ok(ids)
    }

    /// Remove a unit, handing it back to the caller. Unknown ids are a
    /// silent no-op (`None`); calling twice is safe.
    pub fn unregister(&mut self, id: UnitId) -> Option<Box<dyn Schedulable>> {
        let pos = self.registry.iter().position(|e| e.id == id)?;
        Some(self.registry.remove(pos).unit)
    }

    /// Swap a unit's policy and re-sort it into position.
    ///
    /// This is the only way priority order is re-established after a policy
    /// change. Timing state is carried over untouched, including across a
    /// mode change; the next due-check simply evaluates the new mode against
    /// the existing state. Unknown ids are a silent no-op.
    pub fn reprioritize(&mut self, id: UnitId, policy: Arc<TimingPolicy>) {
        let Some(pos) = self.registry.iter().position(|e| e.id == id) else {
            return;
        };
        let mut entry = self.registry.remove(pos);
        entry.policy = policy;
        self.insert_sorted(entry);
    }

    /// Pause the scheduler: subsequent `tick` calls become no-ops
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume a paused scheduler
    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Drive one tick at wall time `now` (monotonically non-decreasing,
    /// supplied by the host frame loop, one call per frame).
    ///
    /// Runs the due units in registry order, drains the op queue, advances
    /// the clock. A unit hook returning an error aborts the remaining units
    /// for this tick only; the drain and the clock advance still happen, and
    /// the error comes back tagged with the unit's name.
    pub fn tick(&mut self, now: f64) -> Result<()> {
        if !self.running {
            return Ok(());
        }

        let first_observation = self.last_wall_time.is_none();
        let frame_delta = match self.last_wall_time {
            Some(prev) => (now - prev).max(0.0),
            None => 0.0,
        };
        self.frame_delta = frame_delta;
        self.last_wall_time = Some(now);

        if first_observation {
            // Host clocks need not start at zero. Units registered before
            // any wall time was observed were seeded at 0.0; re-baseline
            // them so none observes the host epoch as its first delta.
            for entry in self.registry.iter_mut() {
                entry.state.last_run_wall_time = now;
            }
        }

        let tick = self.tick_index;
        let mut failure: Option<CadenceError> = None;

        for entry in self.registry.iter_mut() {
            if !entry.state.started {
                // Flip before invoking: at-most-once even if the hook fails.
                entry.state.started = true;
                if let Err(err) = entry.unit.start_once(&mut self.ops) {
                    failure = Some(unit_failure(entry.unit.name(), "start_once", &err));
                    break;
                }
            }
            if entry.state.is_due(&entry.policy, tick, now) {
                let dt = entry.state.delta_since_last_run(now);
                let outcome = entry.unit.on_tick(dt, &mut self.ops);
                entry.state.record_run(tick, now);
                if let Err(err) = outcome {
                    failure = Some(unit_failure(entry.unit.name(), "on_tick", &err));
                    break;
                }
            }
        }

        // The pass is closed: drained ops apply directly, and registers
        // applied here fire start_once immediately.
        self.ticked_once = true;
        if let Err(err) = self.drain_ops() {
            failure.get_or_insert(err);
        }

        self.tick_index += 1;
        self.elapsed_seconds += frame_delta;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Current tick index (number of completed ticks)
    pub fn tick_index(&self) -> u64 {
        self.tick_index
    }

    /// Accumulated wall seconds across all non-paused ticks
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.registry.iter().any(|e| e.id == id)
    }

    /// Read a unit's current policy
    pub fn policy(&self, id: UnitId) -> Option<&Arc<TimingPolicy>> {
        self.registry.iter().find(|e| e.id == id).map(|e| &e.policy)
    }

    /// Read a unit's current timing state
    pub fn timing_state(&self, id: UnitId) -> Option<&TimingState> {
        self.registry.iter().find(|e| e.id == id).map(|e| &e.state)
    }

    /// Dump clock and registry state in iteration order
    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            tick_index: self.tick_index,
            elapsed_seconds: self.elapsed_seconds,
            running: self.running,
            units: self
                .registry
                .iter()
                .map(|e| UnitSnapshot {
                    id: e.id,
                    name: e.unit.name().to_string(),
                    priority: e.policy.priority,
                    mode: e.policy.mode,
                    started: e.state.started,
                    last_run_tick: e.state.last_run_tick,
                    observed_delta: e.state.observed_delta,
                })
                .collect(),
        }
    }

    /// Apply a registration under a known id. Re-registering an id already
    /// present is a silent no-op and does not reseed its timing state.
    fn apply_register(
        &mut self,
        id: UnitId,
        unit: Box<dyn Schedulable>,
        policy: Arc<TimingPolicy>,
    ) -> Result<()> {
        if self.contains(id) {
            return Ok(());
        }

        let now = self.last_wall_time.unwrap_or(0.0);
        let state = TimingState::seed(&policy, now, self.tick_index, self.frame_delta);
        let mut entry = Entry {
            id,
            unit,
            policy,
            state,
        };

        if self.ticked_once {
            entry.state.started = true;
            let outcome = entry.unit.start_once(&mut self.ops);
            let failed = outcome
                .as_ref()
                .err()
                .map(|err| unit_failure(entry.unit.name(), "start_once", err));
            self.insert_sorted(entry);
            if let Some(err) = failed {
                return Err(err);
            }
        } else {
            self.insert_sorted(entry);
        }
        Ok(())
    }

    /// Binary-search insertion keeping descending priority order; a new
    /// entry lands after any existing entries of equal priority.
    fn insert_sorted(&mut self, entry: Entry) {
        let priority = entry.policy.priority;
        let idx = self
            .registry
            .partition_point(|e| e.policy.priority >= priority);
        self.registry.insert(idx, entry);
    }

    /// Apply all queued ops in FIFO order. A failing `start_once` from a
    /// drained register is remembered but does not stop the drain: the queue
    /// is applied and cleared exactly once per tick either way.
    fn drain_ops(&mut self) -> Result<()> {
        let mut failure: Option<CadenceError> = None;
        for op in self.ops.drain() {
            match op {
                PendingOp::Register { id, unit, policy } => {
                    if let Err(err) = self.apply_register(id, unit, policy) {
                        failure.get_or_insert(err);
                    }
                }
                PendingOp::Unregister(id) => {
                    let _ = self.unregister(id);
                }
                PendingOp::Reprioritize { id, policy } => {
                    self.reprioritize(id, policy);
                }
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn unit_failure(name: &str, phase: &str, err: &CadenceError) -> CadenceError {
    CadenceError::UnitFailed {
        name: name.to_string(),
        phase: phase.to_string(),
        message: err.to_string(),
    }
}
