//! Run the demo frame loop

use crate::units::{Heartbeat, IntervalReporter, Spawner};
use anyhow::Result;
use cadence_profile::ProfileCatalog;
use cadence_sched::{FrameClock, Scheduler, TimingPolicy};
use std::sync::Arc;
use std::time::Duration;

pub fn execute(seconds: f64, fps: u32, profiles_dir: &str) -> Result<()> {
    let catalog = ProfileCatalog::load_from_directory(profiles_dir)?;
    if !catalog.is_empty() {
        println!(
            "Loaded {} timing profile(s) from {}",
            catalog.len(),
            profiles_dir
        );
    }

    let mut sched = Scheduler::new();

    // Profile-driven cadence where the author supplied one, built-in otherwise.
    let reporter_policy = match catalog.get("reporter") {
        Some(policy) => Arc::clone(policy),
        None => Arc::new(TimingPolicy::fixed_interval(10, 0.25)),
    };

    sched.register(
        Box::new(Heartbeat::new("heartbeat")),
        Arc::new(TimingPolicy::every_tick(100)),
    )?;
    sched.register(Box::new(IntervalReporter::new("reporter")), reporter_policy)?;
    sched.register(
        Box::new(Spawner::new()),
        Arc::new(TimingPolicy::every_tick(0)),
    )?;

    let frame = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut clock = FrameClock::new();

    loop {
        let now = clock.sample();
        if now >= seconds {
            break;
        }
        if let Err(e) = sched.tick(now) {
            eprintln!("Tick error: {e}");
        }
        std::thread::sleep(frame);
    }

    let snapshot = sched.snapshot();
    println!(
        "\nFinished: {} ticks over {:.2}s, {} unit(s) registered",
        snapshot.tick_index,
        snapshot.elapsed_seconds,
        snapshot.units.len()
    );
    for unit in &snapshot.units {
        println!(
            "  [{:>4}] {:<16} mode={:?} last_run_tick={} last_dt={:.4}s",
            unit.priority, unit.name, unit.mode, unit.last_run_tick, unit.observed_delta
        );
    }

    Ok(())
}
