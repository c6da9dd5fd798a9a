//! Per-employee day wage calculation.
//!
//! This is the entry point for one attendance record. It resolves the
//! effective window, runs the interval calculator and then applies the rules
//! for the employee's rate type:
//!
//! - **Hourly**: the interval result is the day's pay, extended by
//!   continuation pay for a verified sick departure.
//! - **Salary**: the day pays a fixed `monthly_salary / 21.67` whenever hours
//!   were worked, the status is a paid absence, or the day is a public
//!   holiday. Overtime is paid on top at `daily_rate / 8` times the tier
//!   multiplier.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    EffectiveShift, EffectiveWindow, IntervalWageInput, apply_sick_continuation,
    calculate_interval_wage, qualifies_for_continuation, resolve_effective_window,
};
use crate::config::EngineSettings;
use crate::models::{
    AttendanceRecord, AttendanceStatus, AuditStep, DayWageResult, Employee, RateType,
};

/// Average working days per month used to turn a monthly salary into a daily rate.
pub const SALARY_WORKING_DAYS_PER_MONTH: Decimal = Decimal::from_parts(2167, 0, 0, false, 2);

/// Hours per day used to derive a salaried employee's overtime rate from the daily rate.
pub const SALARY_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Everything known about one attendance record before it is paid.
///
/// All lookups (holiday status, shift resolution) happen before the context
/// is built, so the calculation itself has no ordering hazards.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    /// The attendance record being paid.
    pub record: &'a AttendanceRecord,
    /// The employee the record belongs to.
    pub employee: &'a Employee,
    /// The employee's resolved shift.
    pub shift: EffectiveShift,
    /// Whether the record's date is a public holiday for the employee's branch.
    /// An overnight shift keeps this status after midnight.
    pub is_public_holiday: bool,
    /// Engine settings.
    pub settings: &'a EngineSettings,
    /// Used as the end of a session that has not been clocked out.
    pub now: NaiveDateTime,
}

/// The outcome of paying one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWageCalculation {
    /// The employee paid.
    pub employee_id: String,
    /// The attendance record paid.
    pub record_id: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// How the employee is paid.
    pub rate_type: RateType,
    /// Hours and pay for the day.
    pub result: DayWageResult,
    /// Ordinary-tier pay for hourly staff, the daily rate (when earned) for salaried staff.
    pub base_pay: Decimal,
    /// The window that was paid, if any.
    pub effective_window: Option<EffectiveWindow>,
    /// True when the session has not been clocked out yet.
    pub is_provisional: bool,
    /// True when continuation pay extended the day.
    pub continuation_applied: bool,
    /// Step-by-step record of the calculation.
    pub audit_steps: Vec<AuditStep>,
    /// Variance notes for the wage run line.
    pub notes: Vec<String>,
}

#[derive(Default)]
struct AuditRecorder {
    steps: Vec<AuditStep>,
}

impl AuditRecorder {
    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }
}

/// Calculates the wage for one attendance record.
///
/// Never fails: a record without a usable window pays zero (or the daily rate
/// for a salaried paid absence) and says why in `notes`.
///
/// # Example
///
/// ```
/// use wage_engine::calculation::{calculate_day_wage, DayContext, EffectiveShift};
/// use wage_engine::config::EngineSettings;
/// use wage_engine::models::{AttendanceRecord, AttendanceStatus, Employee, RateType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let settings = EngineSettings::default();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ana Lima".to_string(),
///     rate_type: RateType::Hourly,
///     hourly_rate: Some(Decimal::from(10)),
///     monthly_salary: None,
///     shift_start: None,
///     shift_end: None,
///     branch: "north".to_string(),
///     is_company_housed: false,
///     is_supervisor: false,
/// };
/// let record = AttendanceRecord {
///     id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     employee_name: "Ana Lima".to_string(),
///     date,
///     clock_in: date.and_hms_opt(6, 55, 0),
///     clock_out: date.and_hms_opt(16, 50, 0),
///     status: AttendanceStatus::Present,
///     branch: "north".to_string(),
///     cached_hourly_rate: None,
///     reason: None,
///     medical_certificate: None,
/// };
///
/// let calculation = calculate_day_wage(&DayContext {
///     record: &record,
///     employee: &employee,
///     shift: EffectiveShift::resolve(&employee, None, &settings.default_shift),
///     is_public_holiday: false,
///     settings: &settings,
///     now: date.and_hms_opt(23, 0, 0).unwrap(),
/// });
///
/// assert_eq!(calculation.result.total_hours, Decimal::new(875, 2));
/// assert_eq!(calculation.result.total_wage, Decimal::new(875, 1));
/// ```
pub fn calculate_day_wage(context: &DayContext<'_>) -> DayWageCalculation {
    let mut audit = AuditRecorder::default();
    let mut notes = Vec::new();
    let record = context.record;
    let settings = context.settings;

    let window = resolve_effective_window(
        record,
        &context.shift,
        settings.snap_tolerance_minutes,
        context.now,
    );

    audit.record(
        "effective_window",
        "Effective Window",
        serde_json::json!({
            "clock_in": record.clock_in,
            "clock_out": record.clock_out,
            "shift_start": context.shift.start,
            "shift_end": context.shift.end,
            "shift_source": context.shift.source,
        }),
        serde_json::json!({
            "start": window.map(|w| w.start),
            "end": window.map(|w| w.end),
            "is_provisional": window.is_some_and(|w| w.is_provisional),
        }),
        match (&window, record.clock_in) {
            (_, None) => "No clock-in recorded; no hours are paid".to_string(),
            (None, Some(_)) => "Clock-out is not after clock-in; no hours are paid".to_string(),
            (Some(w), Some(_)) => format!(
                "Paid window {} to {} (start snapped: {}, end snapped: {})",
                w.start.format("%H:%M"),
                w.end.format("%H:%M"),
                w.start_snapped,
                w.end_snapped
            ),
        },
    );

    let is_provisional = window.is_some_and(|w| w.is_provisional);
    if is_provisional {
        notes.push(format!("Still clocked in on {}; hours are provisional.", record.date));
    }

    let (result, base_pay, continuation_applied) = match context.employee.rate_type {
        RateType::Hourly => calculate_hourly_day(context, window.as_ref(), &mut audit, &mut notes),
        RateType::Salary => calculate_salary_day(context, window.as_ref(), &mut audit),
    };

    DayWageCalculation {
        employee_id: context.employee.id.clone(),
        record_id: record.id.clone(),
        date: record.date,
        rate_type: context.employee.rate_type,
        result,
        base_pay,
        effective_window: window,
        is_provisional,
        continuation_applied,
        audit_steps: audit.steps,
        notes,
    }
}

fn interval_input<'a>(
    context: &'a DayContext<'a>,
    window: &EffectiveWindow,
    hourly_rate: Decimal,
) -> IntervalWageInput<'a> {
    IntervalWageInput {
        start: window.start,
        end: window.end,
        anchor_date: window.start.date(),
        hourly_rate,
        shift: &context.shift,
        is_public_holiday: context.is_public_holiday,
        settings: context.settings,
    }
}

fn calculate_hourly_day(
    context: &DayContext<'_>,
    window: Option<&EffectiveWindow>,
    audit: &mut AuditRecorder,
    notes: &mut Vec<String>,
) -> (DayWageResult, Decimal, bool) {
    let record = context.record;
    let rate = record
        .cached_hourly_rate
        .or(context.employee.hourly_rate)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);

    let Some(window) = window else {
        return (DayWageResult::default(), Decimal::ZERO, false);
    };

    let input = interval_input(context, window, rate);
    let mut result = calculate_interval_wage(&input);

    audit.record(
        "interval_wage",
        "Interval Wage",
        serde_json::json!({
            "hourly_rate": rate.normalize().to_string(),
            "is_public_holiday": context.is_public_holiday,
            "slice_minutes": context.settings.slice_minutes,
        }),
        serde_json::to_value(&result).unwrap_or_default(),
        format!(
            "{} hours paid: {} ordinary, {} at 1.5x, {} at 2.0x",
            result.total_hours.normalize(),
            result.normal_hours().normalize(),
            result.overtime_hours_15.normalize(),
            result.overtime_hours_20.normalize()
        ),
    );

    let mut continuation_applied = false;
    if qualifies_for_continuation(context.employee, record, &context.settings.illness_keywords) {
        if let Some(outcome) = apply_sick_continuation(&mut result, window, &input) {
            audit.record(
                "sick_continuation",
                "Sick Continuation Pay",
                serde_json::json!({
                    "from": outcome.from,
                    "to": outcome.to,
                }),
                serde_json::json!({
                    "added_hours": outcome.added_hours.normalize().to_string(),
                    "added_wage": outcome.added_wage.normalize().to_string(),
                }),
                format!(
                    "Verified sick departure at {}; paid through to shift end {}",
                    outcome.from.format("%H:%M"),
                    outcome.to.format("%H:%M")
                ),
            );
            notes.push(format!(
                "Sick continuation paid on {} ({} h).",
                record.date,
                outcome.added_hours.normalize()
            ));
            continuation_applied = true;
        }
    } else if record.status == AttendanceStatus::LeaveEarly && !window.is_provisional {
        let (_, shift_end) = context.shift.anchored(input.anchor_date);
        if window.end < shift_end {
            notes.push(format!(
                "Left early on {} at {}; shortfall unpaid.",
                record.date,
                window.end.format("%H:%M")
            ));
        }
    }

    let base_pay = result.normal_pay();
    (result, base_pay, continuation_applied)
}

fn calculate_salary_day(
    context: &DayContext<'_>,
    window: Option<&EffectiveWindow>,
    audit: &mut AuditRecorder,
) -> (DayWageResult, Decimal, bool) {
    let salary = &context.settings.salary;
    let monthly = context
        .employee
        .monthly_salary
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let daily_rate = monthly / salary.working_days_per_month;
    let hourly_rate_for_ot = daily_rate / salary.hours_per_day;

    let worked = window
        .map(|w| calculate_interval_wage(&interval_input(context, w, hourly_rate_for_ot)))
        .unwrap_or_default();

    let status = context.record.status;
    let is_paid_day = worked.total_hours > Decimal::ZERO
        || status.is_paid_absence()
        || context.is_public_holiday;
    let base_pay = if is_paid_day { daily_rate } else { Decimal::ZERO };

    let result = DayWageResult {
        total_hours: worked.total_hours,
        total_wage: base_pay + worked.overtime_pay_15 + worked.overtime_pay_20,
        overtime_hours_15: worked.overtime_hours_15,
        overtime_hours_20: worked.overtime_hours_20,
        overtime_pay_15: worked.overtime_pay_15,
        overtime_pay_20: worked.overtime_pay_20,
    };

    audit.record(
        "salary_day",
        "Salaried Day Rate",
        serde_json::json!({
            "monthly_salary": monthly.normalize().to_string(),
            "working_days_per_month": salary.working_days_per_month.normalize().to_string(),
            "hours_per_day": salary.hours_per_day.normalize().to_string(),
            "hours_worked": worked.total_hours.normalize().to_string(),
            "status": status,
            "is_public_holiday": context.is_public_holiday,
        }),
        serde_json::json!({
            "daily_rate": daily_rate.round_dp(4).to_string(),
            "hourly_rate_for_ot": hourly_rate_for_ot.round_dp(4).to_string(),
            "base_pay": base_pay.round_dp(4).to_string(),
            "overtime_pay": result.overtime_pay().round_dp(4).to_string(),
        }),
        if is_paid_day {
            format!(
                "Daily rate {} paid; overtime {} h at 1.5x and {} h at 2.0x on {} per hour",
                daily_rate.round_dp(2),
                result.overtime_hours_15.normalize(),
                result.overtime_hours_20.normalize(),
                hourly_rate_for_ot.round_dp(2)
            )
        } else {
            "No hours worked and not a paid absence or holiday; daily rate not paid".to_string()
        },
    );

    (result, base_pay, false)
}
