//! Timing profile record definitions

use cadence_core::{CadenceError, Result};
use cadence_sched::{TimingMode, TimingPolicy};
use serde::{Deserialize, Serialize};

/// An authored timing profile as it appears in a `.timing.toml` sidecar.
///
/// Records are validated into immutable [`TimingPolicy`] values before any
/// unit sees them; a record that fails validation is rejected whole, so a
/// unit keeping its previous policy is the natural failure mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub mode: TimingMode,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub interval_seconds: Option<f64>,
    #[serde(default)]
    pub tick_divisor: Option<u64>,
    #[serde(default)]
    pub tick_offset: Option<u64>,
}

/// TOML sidecar file format for timing profiles
#[derive(Debug, Deserialize)]
pub struct ProfileFile {
    pub profile: ProfileRecord,
}

impl ProfileRecord {
    /// Validate this record into a policy.
    ///
    /// Mode parameters must be present for the mode that reads them and must
    /// be finite; out-of-domain values are clamped by the policy constructors.
    pub fn to_policy(&self) -> Result<TimingPolicy> {
        match self.mode {
            TimingMode::EveryTick => Ok(TimingPolicy::every_tick(self.priority)),
            TimingMode::FixedInterval => {
                let interval = self.interval_seconds.ok_or_else(|| {
                    CadenceError::InvalidPolicy(format!(
                        "profile '{}': fixed_interval requires interval_seconds",
                        self.name
                    ))
                })?;
                if !interval.is_finite() {
                    return Err(CadenceError::InvalidPolicy(format!(
                        "profile '{}': interval_seconds must be finite, got {}",
                        self.name, interval
                    )));
                }
                Ok(TimingPolicy::fixed_interval(self.priority, interval))
            }
            TimingMode::FixedTickCount => {
                let divisor = self.tick_divisor.ok_or_else(|| {
                    CadenceError::InvalidPolicy(format!(
                        "profile '{}': fixed_tick_count requires tick_divisor",
                        self.name
                    ))
                })?;
                Ok(TimingPolicy::fixed_tick_count(
                    self.priority,
                    divisor,
                    self.tick_offset.unwrap_or(0),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_record_serde() {
        let toml_str = r#"
[profile]
name = "ai_think"
mode = "fixed_interval"
priority = 20
interval_seconds = 0.25
"#;
        let file: ProfileFile = toml::from_str(toml_str).unwrap();
        assert_eq!(file.profile.name, "ai_think");
        assert_eq!(file.profile.mode, TimingMode::FixedInterval);
        assert_eq!(file.profile.priority, 20);

        let policy = file.profile.to_policy().unwrap();
        assert_eq!(policy.interval_seconds, 0.25);
    }

    #[test]
    fn test_missing_interval_rejected() {
        let record = ProfileRecord {
            name: "broken".to_string(),
            mode: TimingMode::FixedInterval,
            priority: 0,
            interval_seconds: None,
            tick_divisor: None,
            tick_offset: None,
        };
        let err = record.to_policy().unwrap_err();
        assert!(matches!(err, CadenceError::InvalidPolicy(_)));
    }

    #[test]
    fn test_non_finite_interval_rejected() {
        let record = ProfileRecord {
            name: "nan".to_string(),
            mode: TimingMode::FixedInterval,
            priority: 0,
            interval_seconds: Some(f64::NAN),
            tick_divisor: None,
            tick_offset: None,
        };
        assert!(record.to_policy().is_err());
    }

    #[test]
    fn test_zero_divisor_clamped_not_rejected() {
        let record = ProfileRecord {
            name: "eager".to_string(),
            mode: TimingMode::FixedTickCount,
            priority: 0,
            interval_seconds: None,
            tick_divisor: Some(0),
            tick_offset: Some(3),
        };
        let policy = record.to_policy().unwrap();
        assert_eq!(policy.tick_divisor, 1);
        assert_eq!(policy.tick_offset, 3);
    }
}
