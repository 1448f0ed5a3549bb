//! Read-only scheduler introspection

use crate::policy::TimingMode;
use cadence_core::UnitId;
use serde::Serialize;

/// One registry entry as seen at snapshot time
#[derive(Debug, Clone, Serialize)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub name: String,
    pub priority: i32,
    pub mode: TimingMode,
    pub started: bool,
    pub last_run_tick: u64,
    pub observed_delta: f64,
}

/// A point-in-time dump of the scheduler: clock state plus the registry in
/// its current iteration order. Carries no contract beyond accurately
/// reflecting that state; intended for tests and tooling.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerSnapshot {
    pub tick_index: u64,
    pub elapsed_seconds: f64,
    pub running: bool,
    pub units: Vec<UnitSnapshot>,
}

impl SchedulerSnapshot {
    /// Unit names in iteration order, a convenience for assertions
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }
}
