//! Timing profile catalog

use crate::record::{ProfileFile, ProfileRecord};
use cadence_core::{CadenceError, Result};
use cadence_sched::TimingPolicy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Catalog of named timing profiles, validated and ready to hand to units.
///
/// Policies are stored behind `Arc` so many units can share one instance;
/// the catalog never mutates a policy after it is built.
#[derive(Debug, Default)]
pub struct ProfileCatalog {
    /// Policies indexed by profile name; duplicate names: last writer wins
    profiles: HashMap<String, Arc<TimingPolicy>>,
}

impl ProfileCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load timing profiles from `.timing.toml` sidecar files in a directory tree
    pub fn load_from_directory<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut catalog = Self::new();
        Self::scan_directory(&mut catalog, path.as_ref())?;
        Ok(catalog)
    }

    fn scan_directory(catalog: &mut ProfileCatalog, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::scan_directory(catalog, &path)?;
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with(".timing.toml"))
                .unwrap_or(false)
            {
                let content = fs::read_to_string(&path)?;
                let file: ProfileFile = toml::from_str(&content).map_err(|e| {
                    CadenceError::ProfileError(format!(
                        "Failed to parse {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                catalog.register(file.profile)?;
            }
        }

        Ok(())
    }

    /// Validate and add a record to the catalog
    pub fn register(&mut self, record: ProfileRecord) -> Result<()> {
        let policy = record.to_policy()?;
        self.profiles.insert(record.name, Arc::new(policy));
        Ok(())
    }

    /// Look up a profile by name
    pub fn get(&self, name: &str) -> Option<&Arc<TimingPolicy>> {
        self.profiles.get(name)
    }

    /// Look up a profile by name, or error with the names that do exist
    pub fn get_or_err(&self, name: &str) -> Result<Arc<TimingPolicy>> {
        self.profiles.get(name).cloned().ok_or_else(|| {
            CadenceError::ProfileError(format!(
                "unknown timing profile '{}' (known: {})",
                name,
                self.names().join(", ")
            ))
        })
    }

    /// All profile names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
