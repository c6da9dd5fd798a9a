//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and branch defaults from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::BranchDetails;

use super::types::{BranchesConfig, EngineSettings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Slicing, snapping, lunch, multipliers, salary policy
/// └── branches.yaml  # Per-branch default shifts
/// ```
///
/// # Example
///
/// ```no_run
/// use wage_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Slice length: {} minutes", loader.settings().slice_minutes);
/// if let Some(branch) = loader.branch("north") {
///     println!("North starts at {:?}", branch.shift_start);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: EngineSettings,
    branches: Vec<BranchDetails>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `engine.yaml` is missing, if either file contains
    /// invalid YAML, or if the settings fail validation. A missing
    /// `branches.yaml` means no branch defines its own shift.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        settings.validate()?;

        let branches_path = path.join("branches.yaml");
        let branches = if branches_path.exists() {
            Self::load_yaml::<BranchesConfig>(&branches_path)?.branches
        } else {
            Vec::new()
        };

        debug!(
            path = %path.display(),
            branches = branches.len(),
            slice_minutes = settings.slice_minutes,
            "Loaded engine configuration"
        );

        Ok(Self { settings, branches })
    }

    /// Builds a loader from values already in memory.
    pub fn from_parts(settings: EngineSettings, branches: Vec<BranchDetails>) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self { settings, branches })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns every configured branch.
    pub fn branches(&self) -> &[BranchDetails] {
        &self.branches
    }

    /// Looks up a branch by name, ignoring case.
    pub fn branch(&self, name: &str) -> Option<&BranchDetails> {
        self.branches.iter().find(|branch| branch.is_named(name))
    }
}
