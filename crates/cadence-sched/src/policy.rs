//! Timing policies — priority and cadence for schedulable units

use serde::{Deserialize, Serialize};

/// Allowed range for a fixed-interval target, in seconds
pub const INTERVAL_MIN_SECONDS: f64 = 0.0001;
pub const INTERVAL_MAX_SECONDS: f64 = 1000.0;

/// How often a unit wants its per-tick work invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    /// Run on every scheduler tick
    EveryTick,
    /// Run once a fixed wall-clock interval has elapsed
    FixedInterval,
    /// Run once every N ticks, optionally phase-shifted by an offset
    FixedTickCount,
}

/// An immutable record describing a unit's priority and cadence.
///
/// Policies are shared: several units may hold the same `Arc<TimingPolicy>`.
/// Cadence is changed by swapping to a different policy instance, never by
/// mutating one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTimingPolicy")]
pub struct TimingPolicy {
    /// Higher priority runs earlier in the tick pass. Ties keep registration order.
    pub priority: i32,
    pub mode: TimingMode,
    /// Target interval in seconds. Read only in `FixedInterval` mode.
    pub interval_seconds: f64,
    /// Run once every this many ticks. Read only in `FixedTickCount` mode.
    pub tick_divisor: u64,
    /// Phase offset in ticks, staggering units that share a divisor.
    /// Read only in `FixedTickCount` mode.
    pub tick_offset: u64,
}

/// Unclamped mirror of [`TimingPolicy`] that deserialization passes through,
/// so a persisted record cannot bypass the domain clamps.
#[derive(Deserialize)]
struct RawTimingPolicy {
    #[serde(default)]
    priority: i32,
    mode: TimingMode,
    #[serde(default = "default_interval")]
    interval_seconds: f64,
    #[serde(default = "default_divisor")]
    tick_divisor: u64,
    #[serde(default)]
    tick_offset: u64,
}

impl From<RawTimingPolicy> for TimingPolicy {
    fn from(raw: RawTimingPolicy) -> Self {
        Self {
            priority: raw.priority,
            mode: raw.mode,
            interval_seconds: raw.interval_seconds,
            tick_divisor: raw.tick_divisor,
            tick_offset: raw.tick_offset,
        }
        .normalized()
    }
}

fn default_interval() -> f64 {
    1.0
}

fn default_divisor() -> u64 {
    1
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::every_tick(0)
    }
}

impl TimingPolicy {
    /// Policy that runs every tick at the given priority
    pub fn every_tick(priority: i32) -> Self {
        Self {
            priority,
            mode: TimingMode::EveryTick,
            interval_seconds: default_interval(),
            tick_divisor: default_divisor(),
            tick_offset: 0,
        }
    }

    /// Policy that runs once per wall-clock interval.
    ///
    /// The interval is clamped into `[INTERVAL_MIN_SECONDS, INTERVAL_MAX_SECONDS]`.
    pub fn fixed_interval(priority: i32, interval_seconds: f64) -> Self {
        Self {
            priority,
            mode: TimingMode::FixedInterval,
            interval_seconds: clamp_interval(interval_seconds),
            tick_divisor: default_divisor(),
            tick_offset: 0,
        }
    }

    /// Policy that runs once every `tick_divisor` ticks, phase-shifted by
    /// `tick_offset` ticks. A zero divisor is clamped to 1.
    pub fn fixed_tick_count(priority: i32, tick_divisor: u64, tick_offset: u64) -> Self {
        Self {
            priority,
            mode: TimingMode::FixedTickCount,
            interval_seconds: default_interval(),
            tick_divisor: tick_divisor.max(1),
            tick_offset,
        }
    }

    /// Apply the domain clamps to a policy built field-by-field.
    /// Deserialization runs through this automatically.
    pub fn normalized(mut self) -> Self {
        self.interval_seconds = clamp_interval(self.interval_seconds);
        self.tick_divisor = self.tick_divisor.max(1);
        self
    }
}

fn clamp_interval(seconds: f64) -> f64 {
    seconds.clamp(INTERVAL_MIN_SECONDS, INTERVAL_MAX_SECONDS)
}
