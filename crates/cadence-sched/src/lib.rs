//! Cadence Sched - Priority-ordered per-frame update scheduling
//!
//! Provides the centralized update scheduler building blocks:
//! - `TimingPolicy` / `TimingMode` — immutable cadence and priority records
//! - `TimingState` — per-unit due/delta bookkeeping
//! - `Schedulable` — trait for units driven by the tick pass
//! - `ScheduleOps` — deferred-mutation queue for in-tick registry changes
//! - `Scheduler` — the ordered registry and tick entry point
//! - `FrameClock` — wall-clock sampler for host frame loops

mod clock;
mod ops;
mod policy;
mod scheduler;
mod snapshot;
mod timing;
mod unit;

pub use clock::FrameClock;
pub use ops::{PendingOp, ScheduleOps};
pub use policy::{TimingMode, TimingPolicy, INTERVAL_MAX_SECONDS, INTERVAL_MIN_SECONDS};
pub use scheduler::Scheduler;
pub use snapshot::{SchedulerSnapshot, UnitSnapshot};
pub use timing::TimingState;
pub use unit::Schedulable;
