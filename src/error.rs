//! Error types for the Wage Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration or
//! managing a wage run. Day calculations themselves never fail: malformed
//! attendance degrades to a zero result.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Wage Engine.
///
/// # Example
///
/// ```
/// use wage_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot work with.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// A wage run with no lines cannot be finalized.
    #[error("Wage run {run_id} has no lines and cannot be finalized")]
    EmptyWageRun {
        /// The run that was rejected.
        run_id: Uuid,
    },

    /// The wage run is finalized and can no longer be changed.
    #[error("Wage run {run_id} is finalized and cannot be modified")]
    WageRunFinalized {
        /// The run that was rejected.
        run_id: Uuid,
    },

    /// No line exists for the given employee in the wage run.
    #[error("No wage run line for employee '{employee_id}'")]
    LineNotFound {
        /// The employee whose line was requested.
        employee_id: String,
    },

    /// Several lines share the employee id, so the target line must be named.
    #[error("Employee '{employee_id}' has {line_count} wage run lines; name the line to edit")]
    AmbiguousLine {
        /// The employee id shared by the lines.
        employee_id: String,
        /// How many lines carry the id.
        line_count: usize,
    },

    /// A line still includes hours from an attendance record without a clock-out.
    #[error("Employee '{employee_id}' has attendance that is still clocked in")]
    ProvisionalAttendance {
        /// The employee with provisional hours.
        employee_id: String,
    },

    /// A manual adjustment was rejected.
    #[error("Invalid adjustment '{field}': {message}")]
    InvalidAdjustment {
        /// The adjustment field that was rejected.
        field: String,
        /// Why it was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
