//! Configuration types for wage calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every field has a built-in
//! default so a partial `engine.yaml` only needs to name what it overrides.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{
    DEFAULT_SLICE_MINUTES, DEFAULT_SNAP_TOLERANCE_MINUTES, SALARY_HOURS_PER_DAY,
    SALARY_WORKING_DAYS_PER_MONTH,
};
use crate::error::{EngineError, EngineResult};
use crate::models::BranchDetails;

/// A start/end pair of wall-clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShiftTimes {
    /// Start of the shift.
    pub start: NaiveTime,
    /// End of the shift.
    pub end: NaiveTime,
}

impl Default for ShiftTimes {
    /// The company-wide 07:00–16:45 shift.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(16, 45, 0).unwrap_or_default(),
        }
    }
}

/// Unpaid lunch window deducted from every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LunchWindow {
    /// Start of the lunch break.
    pub start: NaiveTime,
    /// End of the lunch break.
    pub end: NaiveTime,
}

impl Default for LunchWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or_default(),
        }
    }
}

/// Pay multipliers for each rate tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TierMultipliers {
    /// Ordinary time.
    pub ordinary: Decimal,
    /// Saturday, early-start and late overtime.
    pub overtime_15: Decimal,
    /// Sunday and public holidays.
    pub overtime_20: Decimal,
}

impl Default for TierMultipliers {
    fn default() -> Self {
        Self {
            ordinary: Decimal::ONE,
            overtime_15: Decimal::new(15, 1),
            overtime_20: Decimal::TWO,
        }
    }
}

/// How a monthly salary is turned into daily and overtime rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SalaryPolicy {
    /// Divisor from monthly salary to daily rate.
    pub working_days_per_month: Decimal,
    /// Divisor from daily rate to the hourly rate used for overtime.
    pub hours_per_day: Decimal,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self {
            working_days_per_month: SALARY_WORKING_DAYS_PER_MONTH,
            hours_per_day: SALARY_HOURS_PER_DAY,
        }
    }
}

/// Engine-wide calculation settings, loaded from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Length of each pay segment in minutes.
    pub slice_minutes: i64,
    /// How far a clock time may be from a shift boundary and still snap to it.
    pub snap_tolerance_minutes: i64,
    /// Unpaid lunch window.
    pub lunch: LunchWindow,
    /// Shift used when neither the employee nor the branch defines one.
    pub default_shift: ShiftTimes,
    /// Multipliers per rate tier.
    pub multipliers: TierMultipliers,
    /// Salary conversion policy.
    pub salary: SalaryPolicy,
    /// Words in a leave-early reason that mark the departure as illness.
    pub illness_keywords: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            slice_minutes: DEFAULT_SLICE_MINUTES,
            snap_tolerance_minutes: DEFAULT_SNAP_TOLERANCE_MINUTES,
            lunch: LunchWindow::default(),
            default_shift: ShiftTimes::default(),
            multipliers: TierMultipliers::default(),
            salary: SalaryPolicy::default(),
            illness_keywords: [
                "sick", "ill", "illness", "unwell", "fever", "medical", "doctor", "hospital",
            ]
            .iter()
            .map(|word| word.to_string())
            .collect(),
        }
    }
}

impl EngineSettings {
    /// Checks the settings for values the calculators cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.slice_minutes <= 0 {
            return Err(EngineError::InvalidConfig {
                message: format!("slice_minutes must be positive, got {}", self.slice_minutes),
            });
        }
        if self.snap_tolerance_minutes < 0 {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "snap_tolerance_minutes must not be negative, got {}",
                    self.snap_tolerance_minutes
                ),
            });
        }
        if self.lunch.end < self.lunch.start {
            return Err(EngineError::InvalidConfig {
                message: "lunch window ends before it starts".to_string(),
            });
        }
        if self.salary.working_days_per_month <= Decimal::ZERO
            || self.salary.hours_per_day <= Decimal::ZERO
        {
            return Err(EngineError::InvalidConfig {
                message: "salary divisors must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Branches configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchesConfig {
    /// Branch defaults.
    #[serde(default)]
    pub branches: Vec<BranchDetails>,
}
