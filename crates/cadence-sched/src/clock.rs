//! Wall-clock sampler for host frame loops

use std::time::Instant;

/// Produces the monotonically non-decreasing wall time a host frame loop
/// feeds into [`Scheduler::tick`](crate::Scheduler::tick).
///
/// The first sample reads 0.0. Each frame's advance is clamped (default
/// 250 ms) so a debugger pause or window drag does not inject a huge delta
/// into every fixed-interval policy at once.
pub struct FrameClock {
    /// Wall seconds reported by the last sample
    now_seconds: f64,
    /// Maximum seconds a single frame may contribute
    max_frame_seconds: f64,
    last_instant: Instant,
    first_sample: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            now_seconds: 0.0,
            max_frame_seconds: 0.25,
            last_instant: Instant::now(),
            first_sample: true,
        }
    }
}

impl FrameClock {
    /// Create a clock with the default 250 ms frame clamp
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom frame clamp
    pub fn with_max_frame(max_frame_seconds: f64) -> Self {
        Self {
            max_frame_seconds,
            ..Self::default()
        }
    }

    /// Sample the clock. Call once per frame; returns total wall seconds.
    pub fn sample(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_sample {
            self.first_sample = false;
            self.last_instant = now;
            return self.now_seconds;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.now_seconds += elapsed.min(self.max_frame_seconds);
        self.now_seconds
    }

    /// Wall seconds as of the last sample, without advancing
    pub fn now_seconds(&self) -> f64 {
        self.now_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.now_seconds(), 0.0);
        assert_eq!(clock.sample(), 0.0);
    }

    #[test]
    fn test_samples_never_decrease() {
        let mut clock = FrameClock::new();
        let mut prev = clock.sample();
        for _ in 0..100 {
            let next = clock.sample();
            assert!(next >= prev);
            prev = next;
        }
        // Reading without sampling reflects the last sample exactly.
        assert_eq!(clock.now_seconds(), prev);
    }

    #[test]
    fn test_frame_clamp_bounds_advance() {
        let mut clock = FrameClock::with_max_frame(0.01);
        clock.sample();
        std::thread::sleep(std::time::Duration::from_millis(30));
        let after = clock.sample();
        assert!(after <= 0.01 + 1e-9);
    }
}
