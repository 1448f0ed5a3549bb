//! Per-unit timing state machine
//!
//! Each registered unit carries one `TimingState`. The scheduler asks it
//! "due on this tick?" under the unit's policy, and refreshes it after each
//! run. Seeding at registration makes the first observed delta nominal for
//! the policy's mode rather than the wall-clock age of the scheduler.

use crate::policy::{TimingMode, TimingPolicy};

/// Mutable timing bookkeeping for one registered unit.
///
/// Invariants: `observed_delta >= 0`; `last_run_tick` never decreases while
/// the unit stays registered (a seed may place it ahead of the current tick
/// to encode a phase offset, and runs only move it forward from there).
#[derive(Debug, Clone, PartialEq)]
pub struct TimingState {
    /// Wall time of the last run (or the seed time before any run)
    pub last_run_wall_time: f64,
    /// Tick index of the last run (seeded with the policy's phase offset)
    pub last_run_tick: u64,
    /// Delta seconds observed by the most recent run (synthetic until then)
    pub observed_delta: f64,
    /// Whether the start-once hook has fired
    pub started: bool,
}

impl TimingState {
    /// Seed state for a unit registered at wall time `now` on tick `tick`.
    ///
    /// `frame_delta` is the scheduler's most recent frame delta; it stands in
    /// for a measured interval where no previous run exists.
    pub fn seed(policy: &TimingPolicy, now: f64, tick: u64, frame_delta: f64) -> Self {
        let (last_run_tick, observed_delta) = match policy.mode {
            TimingMode::EveryTick => (tick, frame_delta),
            TimingMode::FixedInterval => (tick, policy.interval_seconds),
            TimingMode::FixedTickCount => (
                tick + policy.tick_offset,
                frame_delta * policy.tick_divisor as f64,
            ),
        };
        Self {
            last_run_wall_time: now,
            last_run_tick,
            observed_delta: observed_delta.max(0.0),
            started: false,
        }
    }

    /// Is this unit due to run on tick `tick` at wall time `now`?
    pub fn is_due(&self, policy: &TimingPolicy, tick: u64, now: f64) -> bool {
        match policy.mode {
            TimingMode::EveryTick => true,
            TimingMode::FixedInterval => {
                now - self.last_run_wall_time > policy.interval_seconds
            }
            TimingMode::FixedTickCount => {
                // Saturation handles a seed placed ahead of the current tick
                // by a phase offset: until the tick catches up, not due.
                tick.saturating_sub(self.last_run_tick) + 1 > policy.tick_divisor
            }
        }
    }

    /// Wall-clock seconds elapsed since the last run (or the seed)
    pub fn delta_since_last_run(&self, now: f64) -> f64 {
        (now - self.last_run_wall_time).max(0.0)
    }

    /// Record a completed run. Call after the unit's work has been invoked,
    /// so the delta it observed was measured against the previous run.
    pub fn record_run(&mut self, tick: u64, now: f64) {
        self.observed_delta = self.delta_since_last_run(now);
        self.last_run_tick = tick;
        self.last_run_wall_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tick_always_due() {
        let policy = TimingPolicy::every_tick(0);
        let state = TimingState::seed(&policy, 5.0, 100, 0.016);
        assert!(state.is_due(&policy, 100, 5.0));
        assert!(state.is_due(&policy, 101, 5.016));
    }

    #[test]
    fn test_fixed_interval_due_boundary() {
        let policy = TimingPolicy::fixed_interval(0, 0.1);
        let state = TimingState::seed(&policy, 0.0, 0, 0.016);

        assert!(!state.is_due(&policy, 5, 0.09));
        assert!(state.is_due(&policy, 6, 0.11));
        assert!((state.delta_since_last_run(0.11) - 0.11).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_interval_seed_delta_is_nominal() {
        // Registered long after the scheduler started: the first observed
        // delta is the target interval, not the scheduler's age.
        let policy = TimingPolicy::fixed_interval(0, 0.05);
        let state = TimingState::seed(&policy, 123.4, 1000, 0.016);
        assert_eq!(state.observed_delta, 0.05);
        assert_eq!(state.last_run_tick, 1000);
    }

    #[test]
    fn test_fixed_tick_count_cadence() {
        let policy = TimingPolicy::fixed_tick_count(0, 4, 0);
        let mut state = TimingState::seed(&policy, 0.0, 0, 0.016);

        assert!(!state.is_due(&policy, 0, 0.0));
        assert!(!state.is_due(&policy, 3, 0.048));
        assert!(state.is_due(&policy, 4, 0.064));

        state.record_run(4, 0.064);
        assert!(!state.is_due(&policy, 7, 0.112));
        assert!(state.is_due(&policy, 8, 0.128));
    }

    #[test]
    fn test_fixed_tick_count_offset_staggering() {
        // Same divisor, offsets 0 and 2: the due tick sets never intersect.
        let policy_a = TimingPolicy::fixed_tick_count(0, 4, 0);
        let policy_b = TimingPolicy::fixed_tick_count(0, 4, 2);
        let mut a = TimingState::seed(&policy_a, 0.0, 0, 0.016);
        let mut b = TimingState::seed(&policy_b, 0.0, 0, 0.016);

        for tick in 0..64u64 {
            let now = tick as f64 * 0.016;
            let a_due = a.is_due(&policy_a, tick, now);
            let b_due = b.is_due(&policy_b, tick, now);
            assert!(!(a_due && b_due), "collided on tick {tick}");
            if a_due {
                a.record_run(tick, now);
            }
            if b_due {
                b.record_run(tick, now);
            }
        }
    }

    #[test]
    fn test_fixed_tick_count_seed_delta_scaled() {
        let policy = TimingPolicy::fixed_tick_count(0, 5, 0);
        let state = TimingState::seed(&policy, 10.0, 600, 0.02);
        assert!((state.observed_delta - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_record_run_measures_from_previous_run() {
        let policy = TimingPolicy::every_tick(0);
        let mut state = TimingState::seed(&policy, 1.0, 10, 0.016);
        state.record_run(11, 1.25);
        assert!((state.observed_delta - 0.25).abs() < 1e-12);
        assert_eq!(state.last_run_tick, 11);
        assert_eq!(state.last_run_wall_time, 1.25);
    }

    #[test]
    fn test_delta_never_negative() {
        let policy = TimingPolicy::every_tick(0);
        let state = TimingState::seed(&policy, 2.0, 0, 0.016);
        assert_eq!(state.delta_since_last_run(1.5), 0.0);
    }
}
