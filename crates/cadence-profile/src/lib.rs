//! Cadence Profile - Author-editable timing profile storage
//!
//! Timing profiles are TOML sidecar records (`*.timing.toml`) that describe
//! a unit's priority and cadence. The catalog loads and validates them into
//! shared immutable [`cadence_sched::TimingPolicy`] values.

mod catalog;
mod record;

pub use catalog::ProfileCatalog;
pub use record::{ProfileFile, ProfileRecord};
