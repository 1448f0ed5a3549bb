//! List timing profiles in a directory

use anyhow::Result;
use cadence_profile::ProfileCatalog;
use cadence_sched::TimingMode;

pub fn execute(dir: &str) -> Result<()> {
    let catalog = ProfileCatalog::load_from_directory(dir)?;

    if catalog.is_empty() {
        println!("No timing profiles found in {dir}");
        return Ok(());
    }

    for name in catalog.names() {
        let policy = catalog.get(name).expect("name came from the catalog");
        let cadence = match policy.mode {
            TimingMode::EveryTick => "every tick".to_string(),
            TimingMode::FixedInterval => format!("every {:.4}s", policy.interval_seconds),
            TimingMode::FixedTickCount => format!(
                "every {} tick(s), offset {}",
                policy.tick_divisor, policy.tick_offset
            ),
        };
        println!("{:<20} priority={:<6} {}", name, policy.priority, cadence);
    }

    Ok(())
}
