//! Wage run models.
//!
//! A [`WageRun`] is the payroll artifact for one pay period: one
//! [`WageRunLine`] per employee plus the run-wide incentive settings. The
//! lifecycle operations live in [`crate::wage_run`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, RateType};
use crate::error::{EngineError, EngineResult};

/// Lifecycle state of a wage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WageRunStatus {
    /// Editable; lines may be regenerated and adjusted.
    #[default]
    Draft,
    /// Locked; terminal.
    Finalized,
}

/// Manually entered values for a line.
///
/// Every field is optional: `None` means "not edited", so the distributed or
/// computed value stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdjustments {
    /// Loan repayment deducted from the line.
    #[serde(default)]
    pub loan_deduction: Option<Decimal>,
    /// Tax deducted from the line.
    #[serde(default)]
    pub tax_deduction: Option<Decimal>,
    /// Washing fee deducted from the line.
    #[serde(default)]
    pub washing_fee: Option<Decimal>,
    /// Gas charge deducted from the line.
    #[serde(default)]
    pub gas_charge: Option<Decimal>,
    /// Any other deduction.
    #[serde(default)]
    pub other_deduction: Option<Decimal>,
    /// Supervisor incentive added to the line.
    #[serde(default)]
    pub supervisor_incentive: Option<Decimal>,
}

impl LineAdjustments {
    /// Returns true if no field has been edited.
    pub fn is_empty(&self) -> bool {
        self == &LineAdjustments::default()
    }

    /// Overlays `newer` onto these edits; fields set in `newer` win.
    pub fn merge(&mut self, newer: &LineAdjustments) {
        let overlay = |current: &mut Option<Decimal>, newer: Option<Decimal>| {
            if newer.is_some() {
                *current = newer;
            }
        };
        overlay(&mut self.loan_deduction, newer.loan_deduction);
        overlay(&mut self.tax_deduction, newer.tax_deduction);
        overlay(&mut self.washing_fee, newer.washing_fee);
        overlay(&mut self.gas_charge, newer.gas_charge);
        overlay(&mut self.other_deduction, newer.other_deduction);
        overlay(&mut self.supervisor_incentive, newer.supervisor_incentive);
    }

    /// Rejects negative amounts.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("loan_deduction", self.loan_deduction),
            ("tax_deduction", self.tax_deduction),
            ("washing_fee", self.washing_fee),
            ("gas_charge", self.gas_charge),
            ("other_deduction", self.other_deduction),
            ("supervisor_incentive", self.supervisor_incentive),
        ];
        for (field, value) in fields {
            if value.is_some_and(|amount| amount < Decimal::ZERO) {
                return Err(EngineError::InvalidAdjustment {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Run-wide incentive and charge settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveSettings {
    /// Total gas bill, split evenly across company-housed lines.
    #[serde(default)]
    pub gas_total: Decimal,
    /// Flat washing fee charged to each company-housed line.
    #[serde(default)]
    pub washing_fee: Decimal,
    /// Flat incentive paid to each supervisor line.
    #[serde(default)]
    pub supervisor_fee: Decimal,
}

/// One employee's aggregate over a pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRunLine {
    /// The employee this line pays.
    pub employee_id: String,
    /// The employee name used for grouping and ordering.
    pub employee_name: String,
    /// The employee's branch.
    pub branch: String,
    /// How the employee is paid.
    pub rate_type: RateType,
    /// Number of attendance records that contributed to the line.
    pub days_worked: u32,
    /// Hours at the ordinary tier.
    pub normal_hours: Decimal,
    /// Base pay: ordinary-tier pay for hourly staff, daily rates for salaried staff.
    pub normal_pay: Decimal,
    /// Hours at time-and-a-half.
    pub overtime_hours_15: Decimal,
    /// Pay for time-and-a-half hours.
    pub overtime_pay_15: Decimal,
    /// Hours at double time.
    pub overtime_hours_20: Decimal,
    /// Pay for double-time hours.
    pub overtime_pay_20: Decimal,
    /// All payable hours.
    pub total_hours: Decimal,
    /// Gross wage before adjustments.
    pub total_wage: Decimal,
    /// Loan repayment.
    pub loan_deduction: Decimal,
    /// Tax withheld.
    pub tax_deduction: Decimal,
    /// Washing fee.
    pub washing_fee: Decimal,
    /// Share of the gas bill.
    pub gas_charge: Decimal,
    /// Any other deduction.
    pub other_deduction: Decimal,
    /// Supervisor incentive.
    pub supervisor_incentive: Decimal,
    /// Free-text notes explaining variances (early leave, open sessions, ...).
    pub variance_notes: String,
    /// Whether the employee lives in company housing.
    pub is_company_housed: bool,
    /// Whether the employee is a supervisor.
    pub is_supervisor: bool,
    /// Whether any contributing record had no clock-out yet.
    pub has_provisional_hours: bool,
    /// The adjustments an operator has entered by hand.
    #[serde(default)]
    pub manual_edits: LineAdjustments,
}

impl WageRunLine {
    /// Sum of every deduction on the line.
    pub fn total_deductions(&self) -> Decimal {
        self.loan_deduction
            + self.tax_deduction
            + self.washing_fee
            + self.gas_charge
            + self.other_deduction
    }

    /// `total_wage + supervisor_incentive - deductions`.
    ///
    /// # Example
    ///
    /// ```
    /// use wage_engine::models::{RateType, WageRunLine};
    /// use rust_decimal::Decimal;
    ///
    /// let mut line = WageRunLine::empty("emp_001", "Ana Lima", "north", RateType::Hourly);
    /// line.total_wage = Decimal::new(1000, 0);
    /// line.supervisor_incentive = Decimal::new(50, 0);
    /// line.tax_deduction = Decimal::new(100, 0);
    /// assert_eq!(line.net_pay(), Decimal::new(950, 0));
    /// ```
    pub fn net_pay(&self) -> Decimal {
        self.total_wage + self.supervisor_incentive - self.total_deductions()
    }

    /// A line with no hours, pay or adjustments.
    pub fn empty(employee_id: &str, employee_name: &str, branch: &str, rate_type: RateType) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            employee_name: employee_name.to_string(),
            branch: branch.to_string(),
            rate_type,
            days_worked: 0,
            normal_hours: Decimal::ZERO,
            normal_pay: Decimal::ZERO,
            overtime_hours_15: Decimal::ZERO,
            overtime_pay_15: Decimal::ZERO,
            overtime_hours_20: Decimal::ZERO,
            overtime_pay_20: Decimal::ZERO,
            total_hours: Decimal::ZERO,
            total_wage: Decimal::ZERO,
            loan_deduction: Decimal::ZERO,
            tax_deduction: Decimal::ZERO,
            washing_fee: Decimal::ZERO,
            gas_charge: Decimal::ZERO,
            other_deduction: Decimal::ZERO,
            supervisor_incentive: Decimal::ZERO,
            variance_notes: String::new(),
            is_company_housed: false,
            is_supervisor: false,
            has_provisional_hours: false,
            manual_edits: LineAdjustments::default(),
        }
    }

    /// Writes the manually edited fields onto the line.
    pub fn apply_manual_edits(&mut self) {
        let edits = self.manual_edits.clone();
        if let Some(value) = edits.loan_deduction {
            self.loan_deduction = value;
        }
        if let Some(value) = edits.tax_deduction {
            self.tax_deduction = value;
        }
        if let Some(value) = edits.washing_fee {
            self.washing_fee = value;
        }
        if let Some(value) = edits.gas_charge {
            self.gas_charge = value;
        }
        if let Some(value) = edits.other_deduction {
            self.other_deduction = value;
        }
        if let Some(value) = edits.supervisor_incentive {
            self.supervisor_incentive = value;
        }
    }
}

/// The payroll artifact for one pay period.
///
/// Fields are read through accessors; every change goes through the
/// lifecycle operations so a finalized run stays locked.
///
/// ```compile_fail
/// use wage_engine::models::{PayPeriod, WageRun, WageRunStatus};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let mut run = WageRun::new_draft(PayPeriod {
///     start_date: day,
///     end_date: day,
///     public_holidays: vec![],
/// });
/// run.status = WageRunStatus::Finalized;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRun {
    /// Unique identifier of the run.
    pub(crate) id: Uuid,
    /// The period the run pays.
    pub(crate) period: PayPeriod,
    /// Lifecycle state.
    pub(crate) status: WageRunStatus,
    /// One line per employee.
    pub(crate) lines: Vec<WageRunLine>,
    /// Run-wide incentive settings.
    pub(crate) incentives: IncentiveSettings,
    /// Sum of every line's net pay.
    pub(crate) grand_total: Decimal,
    /// When the run was created.
    pub(crate) created_at: DateTime<Utc>,
    /// When the draft was last saved.
    pub(crate) last_saved_at: Option<DateTime<Utc>>,
    /// When the run was finalized.
    pub(crate) finalized_at: Option<DateTime<Utc>>,
}

impl WageRun {
    /// Unique identifier of the run.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The period the run pays.
    pub fn period(&self) -> &PayPeriod {
        &self.period
    }

    /// Lifecycle state.
    pub fn status(&self) -> WageRunStatus {
        self.status
    }

    /// The lines, in generation order.
    pub fn lines(&self) -> &[WageRunLine] {
        &self.lines
    }

    /// Consumes the run and returns its lines.
    pub fn into_lines(self) -> Vec<WageRunLine> {
        self.lines
    }

    /// Run-wide incentive settings.
    pub fn incentives(&self) -> &IncentiveSettings {
        &self.incentives
    }

    /// Sum of every line's net pay, as of the last mutation.
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// When the run was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the draft was last saved.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// When the run was finalized.
    pub fn finalized_at(&self) -> Option<DateTime<Utc>> {
        self.finalized_at
    }
}
