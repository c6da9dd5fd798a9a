//! Effective shift resolution.
//!
//! An employee's scheduled shift comes from the first source that defines
//! both a start and an end: the employee record, then the branch, then the
//! company-wide default. The chain is walked once per calculation and the
//! result is carried around as an [`EffectiveShift`].

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::ShiftTimes;
use crate::models::{BranchDetails, Employee};

/// Where an effective shift was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSource {
    /// The employee's personal shift.
    Employee,
    /// The branch default.
    Branch,
    /// The company-wide default.
    Global,
}

/// Concrete scheduled shift times for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveShift {
    /// Scheduled start.
    pub start: NaiveTime,
    /// Scheduled end. An end at or before the start means the shift ends the next day.
    pub end: NaiveTime,
    /// Which source supplied the times.
    pub source: ShiftSource,
}

impl EffectiveShift {
    /// Resolves the shift for an employee.
    ///
    /// # Example
    ///
    /// ```
    /// use wage_engine::calculation::{EffectiveShift, ShiftSource};
    /// use wage_engine::config::ShiftTimes;
    /// use wage_engine::models::{BranchDetails, Employee, RateType};
    /// use chrono::NaiveTime;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana Lima".to_string(),
    ///     rate_type: RateType::Hourly,
    ///     hourly_rate: None,
    ///     monthly_salary: None,
    ///     shift_start: None,
    ///     shift_end: None,
    ///     branch: "north".to_string(),
    ///     is_company_housed: false,
    ///     is_supervisor: false,
    /// };
    /// let branch = BranchDetails {
    ///     name: "north".to_string(),
    ///     shift_start: NaiveTime::from_hms_opt(6, 30, 0),
    ///     shift_end: NaiveTime::from_hms_opt(15, 30, 0),
    /// };
    ///
    /// let shift = EffectiveShift::resolve(&employee, Some(&branch), &ShiftTimes::default());
    /// assert_eq!(shift.source, ShiftSource::Branch);
    /// assert_eq!(shift.start, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
    /// ```
    pub fn resolve(
        employee: &Employee,
        branch: Option<&BranchDetails>,
        default_shift: &ShiftTimes,
    ) -> Self {
        if let (Some(start), Some(end)) = (employee.shift_start, employee.shift_end) {
            return Self {
                start,
                end,
                source: ShiftSource::Employee,
            };
        }

        if let Some((start, end)) =
            branch.and_then(|details| details.shift_start.zip(details.shift_end))
        {
            return Self {
                start,
                end,
                source: ShiftSource::Branch,
            };
        }

        Self {
            start: default_shift.start,
            end: default_shift.end,
            source: ShiftSource::Global,
        }
    }

    /// Returns the shift start and end as datetimes on the given day.
    pub fn anchored(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = date.and_time(self.start);
        let mut end = date.and_time(self.end);
        if end <= start {
            end += Duration::days(1);
        }
        (start, end)
    }
}
