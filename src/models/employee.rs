//! Employee model and related types.
//!
//! This module defines the Employee struct and RateType enum
//! for representing workers whose attendance is turned into wages.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an employee is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// Paid for every payable hour at the hourly rate.
    Hourly,
    /// Paid a fixed daily rate derived from a monthly salary, plus overtime.
    Salary,
}

impl std::fmt::Display for RateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateType::Hourly => write!(f, "hourly"),
            RateType::Salary => write!(f, "salary"),
        }
    }
}

/// Represents an employee whose attendance is paid by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name of the employee.
    pub name: String,
    /// Whether the employee is hourly or salaried.
    pub rate_type: RateType,
    /// Hourly rate for hourly employees.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Monthly salary for salaried employees.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Personal shift start, overriding the branch default.
    #[serde(default)]
    pub shift_start: Option<NaiveTime>,
    /// Personal shift end, overriding the branch default.
    #[serde(default)]
    pub shift_end: Option<NaiveTime>,
    /// The branch the employee belongs to.
    pub branch: String,
    /// Whether the employee lives in company housing (gas and washing charges apply).
    #[serde(default)]
    pub is_company_housed: bool,
    /// Whether the employee receives the supervisor incentive.
    #[serde(default)]
    pub is_supervisor: bool,
}

impl Employee {
    /// Returns true if the employee is paid by the hour.
    ///
    /// # Examples
    ///
    /// ```
    /// use wage_engine::models::{Employee, RateType};
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
    /// assert!(employee.is_hourly());
    /// ```
    pub fn is_hourly(&self) -> bool {
        self.rate_type == RateType::Hourly
    }
}
