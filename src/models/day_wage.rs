//! Day wage result models.
//!
//! This module contains the [`DayWageResult`] produced for every attendance
//! record, together with the audit types that explain how it was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours and pay computed for one attendance session.
///
/// `total_hours` and `total_wage` include the overtime buckets. Hours that are
/// in neither overtime bucket were paid at the ordinary tier.
///
/// # Example
///
/// ```
/// use wage_engine::models::DayWageResult;
/// use rust_decimal::Decimal;
///
/// let mut day = DayWageResult::default();
/// day.total_hours = Decimal::new(95, 1);
/// day.overtime_hours_15 = Decimal::new(15, 1);
/// assert_eq!(day.normal_hours(), Decimal::new(80, 1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWageResult {
    /// All payable hours.
    pub total_hours: Decimal,
    /// All pay, ordinary and overtime.
    pub total_wage: Decimal,
    /// Hours paid at time-and-a-half.
    pub overtime_hours_15: Decimal,
    /// Hours paid at double time.
    pub overtime_hours_20: Decimal,
    /// Pay for the time-and-a-half hours.
    pub overtime_pay_15: Decimal,
    /// Pay for the double-time hours.
    pub overtime_pay_20: Decimal,
}

impl DayWageResult {
    /// Hours paid at the ordinary tier.
    pub fn normal_hours(&self) -> Decimal {
        (self.total_hours - self.overtime_hours()).max(Decimal::ZERO)
    }

    /// Pay for the ordinary-tier hours.
    pub fn normal_pay(&self) -> Decimal {
        (self.total_wage - self.overtime_pay()).max(Decimal::ZERO)
    }

    /// Hours in both overtime buckets.
    pub fn overtime_hours(&self) -> Decimal {
        self.overtime_hours_15 + self.overtime_hours_20
    }

    /// Pay in both overtime buckets.
    pub fn overtime_pay(&self) -> Decimal {
        self.overtime_pay_15 + self.overtime_pay_20
    }

    /// Returns true if nothing was worked or paid.
    pub fn is_zero(&self) -> bool {
        self.total_hours.is_zero() && self.total_wage.is_zero()
    }

    /// Adds every field of `other` onto this result.
    pub fn accumulate(&mut self, other: &DayWageResult) {
        self.total_hours += other.total_hours;
        self.total_wage += other.total_wage;
        self.overtime_hours_15 += other.overtime_hours_15;
        self.overtime_hours_20 += other.overtime_hours_20;
        self.overtime_pay_15 += other.overtime_pay_15;
        self.overtime_pay_20 += other.overtime_pay_20;
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A data-integrity warning raised while building a wage run.
///
/// Warnings never stop a calculation; they tell the caller which input was
/// left out and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Warning for an attendance record whose employee could not be found.
    pub fn unmatched_employee(record_id: &str, employee_id: &str) -> Self {
        Self {
            code: "UNMATCHED_EMPLOYEE".to_string(),
            message: format!(
                "Attendance record '{}' references unknown employee '{}' and was excluded",
                record_id, employee_id
            ),
            severity: "high".to_string(),
        }
    }

    /// Warning for an attendance record with no clock-in.
    pub fn missing_clock_in(record_id: &str, employee_id: &str) -> Self {
        Self {
            code: "MISSING_CLOCK_IN".to_string(),
            message: format!(
                "Attendance record '{}' for employee '{}' has no clock-in; no hours were paid",
                record_id, employee_id
            ),
            severity: "medium".to_string(),
        }
    }

    /// Warning for an employee id whose attendance carries more than one name.
    pub fn duplicate_employee_id(employee_id: &str, name_count: usize) -> Self {
        Self {
            code: "DUPLICATE_EMPLOYEE_ID".to_string(),
            message: format!(
                "Employee '{}' appears under {} different names; lines were kept separate",
                employee_id, name_count
            ),
            severity: "medium".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_day() -> DayWageResult {
        DayWageResult {
            total_hours: dec("10"),
            total_wage: dec("135"),
            overtime_hours_15: dec("1"),
            overtime_hours_20: dec("1"),
            overtime_pay_15: dec("15"),
            overtime_pay_20: dec("20"),
        }
    }

    #[test]
    fn test_normal_hours_and_pay_exclude_overtime() {
        let day = sample_day();
        assert_eq!(day.normal_hours(), dec("8"));
        assert_eq!(day.normal_pay(), dec("100"));
        assert_eq!(day.overtime_hours(), dec("2"));
        assert_eq!(day.overtime_pay(), dec("35"));
    }

    #[test]
    fn test_accumulate_adds_every_bucket() {
        let mut day = sample_day();
        day.accumulate(&sample_day());
        assert_eq!(day.total_hours, dec("20"));
        assert_eq!(day.total_wage, dec("270"));
        assert_eq!(day.overtime_hours_15, dec("2"));
        assert_eq!(day.overtime_hours_20, dec("2"));
        assert_eq!(day.overtime_pay_15, dec("30"));
        assert_eq!(day.overtime_pay_20, dec("40"));
    }

    #[test]
    fn test_default_is_zero() {
        let day = DayWageResult::default();
        assert!(day.is_zero());
        assert_eq!(day.normal_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_serialization_uses_snake_case_fields() {
        let json = serde_json::to_value(sample_day()).unwrap();
        assert_eq!(json["overtime_hours_15"], "1");
        assert_eq!(json["total_wage"], "135");
    }

    #[test]
    fn test_unmatched_employee_warning() {
        let warning = AuditWarning::unmatched_employee("att_009", "emp_ghost");
        assert_eq!(warning.code, "UNMATCHED_EMPLOYEE");
        assert!(warning.message.contains("att_009"));
        assert!(warning.message.contains("emp_ghost"));
        assert_eq!(warning.severity, "high");
    }
}
