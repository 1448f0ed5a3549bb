//! Demo schedulable units for the CLI frame loop

use cadence_core::{Result, UnitId};
use cadence_sched::{Schedulable, ScheduleOps, TimingPolicy};
use std::sync::Arc;

/// Counts its runs; the every-tick baseline
pub struct Heartbeat {
    label: String,
    pub runs: u64,
}

impl Heartbeat {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            runs: 0,
        }
    }
}

impl Schedulable for Heartbeat {
    fn on_tick(&mut self, _dt: f64, _ops: &mut ScheduleOps) -> Result<()> {
        self.runs += 1;
        if self.runs % 60 == 0 {
            println!("[{}] {} runs", self.label, self.runs);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Prints the delta it observed each time its interval elapses
pub struct IntervalReporter {
    label: String,
}

impl IntervalReporter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Schedulable for IntervalReporter {
    fn start_once(&mut self, _ops: &mut ScheduleOps) -> Result<()> {
        println!("[{}] started", self.label);
        Ok(())
    }

    fn on_tick(&mut self, dt: f64, _ops: &mut ScheduleOps) -> Result<()> {
        println!("[{}] ran after {:.3}s", self.label, dt);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Registers a child heartbeat mid-run and removes it again later,
/// exercising the deferred-mutation queue from inside a tick.
pub struct Spawner {
    elapsed: f64,
    child: Option<UnitId>,
    removed: bool,
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            child: None,
            removed: false,
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedulable for Spawner {
    fn on_tick(&mut self, dt: f64, ops: &mut ScheduleOps) -> Result<()> {
        self.elapsed += dt;

        if self.child.is_none() && self.elapsed > 0.5 {
            let id = ops.register(
                Box::new(Heartbeat::new("spawned-child")),
                Arc::new(TimingPolicy::fixed_tick_count(5, 10, 0)),
            );
            println!("[spawner] registered child {id}");
            self.child = Some(id);
        }

        if let Some(id) = self.child {
            if !self.removed && self.elapsed > 1.5 {
                ops.unregister(id);
                println!("[spawner] unregistered child {id}");
                self.removed = true;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "spawner"
    }
}
