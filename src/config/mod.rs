//! Configuration loading and management for the Wage Engine.
//!
//! This module loads engine settings (slice length, snap tolerance, lunch
//! window, tier multipliers, salary policy) and branch shift defaults from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use wage_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Snap tolerance: {} minutes", config.settings().snap_tolerance_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BranchesConfig, EngineSettings, LunchWindow, SalaryPolicy, ShiftTimes, TierMultipliers,
};
