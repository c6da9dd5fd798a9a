//! Continuation pay for verified sick departures.
//!
//! An hourly employee who leaves early because of illness, and whose medical
//! certificate has been verified, is paid through to the scheduled shift end.
//! Without a verified certificate the shortfall stays unpaid.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{EffectiveWindow, IntervalWageInput, calculate_interval_wage_into};
use crate::models::{AttendanceRecord, AttendanceStatus, DayWageResult, Employee};

/// What continuation pay added to a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationOutcome {
    /// Where the continuation starts (the actual departure).
    pub from: NaiveDateTime,
    /// Where it ends (the scheduled shift end).
    pub to: NaiveDateTime,
    /// Hours added to the day.
    pub added_hours: Decimal,
    /// Pay added to the day.
    pub added_wage: Decimal,
}

/// Returns true if the reason text mentions any illness keyword as a whole word.
///
/// # Example
///
/// ```
/// use wage_engine::calculation::indicates_illness;
///
/// let keywords = vec!["sick".to_string(), "ill".to_string()];
/// assert!(indicates_illness("Felt ILL after lunch", &keywords));
/// assert!(!indicates_illness("Will return tomorrow", &keywords));
/// ```
pub fn indicates_illness(reason: &str, keywords: &[String]) -> bool {
    reason
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| {
            keywords
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(word))
        })
}

/// Checks every precondition for continuation pay except the time gap itself.
pub fn qualifies_for_continuation(
    employee: &Employee,
    record: &AttendanceRecord,
    illness_keywords: &[String],
) -> bool {
    employee.is_hourly()
        && record.status == AttendanceStatus::LeaveEarly
        && record
            .reason
            .as_deref()
            .is_some_and(|reason| indicates_illness(reason, illness_keywords))
        && record.has_verified_certificate()
}

/// Pays the gap between the actual departure and the scheduled shift end.
///
/// `input` carries the day's rate, shift, holiday flag and settings; its start
/// and end are replaced by the gap. The gap is added onto `result`. Returns
/// `None` when the window already reaches the shift end or is still open.
pub fn apply_sick_continuation(
    result: &mut DayWageResult,
    window: &EffectiveWindow,
    input: &IntervalWageInput<'_>,
) -> Option<ContinuationOutcome> {
    if window.is_provisional {
        return None;
    }

    let (_, shift_end) = input.shift.anchored(input.anchor_date);
    if window.end >= shift_end {
        return None;
    }

    let gap = IntervalWageInput {
        start: window.end,
        end: shift_end,
        ..*input
    };

    let hours_before = result.total_hours;
    let wage_before = result.total_wage;
    calculate_interval_wage_into(result, &gap, true);

    Some(ContinuationOutcome {
        from: window.end,
        to: shift_end,
        added_hours: result.total_hours - hours_before,
        added_wage: result.total_wage - wage_before,
    })
}
