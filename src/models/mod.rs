//! Core data models for the Wage Engine.
//!
//! This module contains the read-only input snapshots (attendance, employees,
//! branches, holidays) and the calculation outputs (day results, wage runs).

mod attendance;
mod branch;
mod day_wage;
mod employee;
mod pay_period;
mod wage_run;

pub use attendance::{AttendanceRecord, AttendanceStatus, MedicalCertificate};
pub use branch::BranchDetails;
pub use day_wage::{AuditStep, AuditWarning, DayWageResult};
pub use employee::{Employee, RateType};
pub use pay_period::{PayPeriod, PublicHoliday};
pub use wage_run::{
    IncentiveSettings, LineAdjustments, WageRun, WageRunLine, WageRunStatus,
};
