//! Interval wage calculation.
//!
//! The effective window is cut into fixed-length segments (the last one may be
//! shorter). Each segment loses whatever part of it overlaps the unpaid lunch
//! window, is classified into a rate tier, and its hours and pay are added to
//! the day's totals.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{EffectiveShift, RateTier, classify_segment};
use crate::config::EngineSettings;
use crate::models::DayWageResult;

/// Default segment length, in minutes.
pub const DEFAULT_SLICE_MINUTES: i64 = 15;

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Everything the interval calculator needs for one span of time.
#[derive(Debug, Clone, Copy)]
pub struct IntervalWageInput<'a> {
    /// Start of the span.
    pub start: NaiveDateTime,
    /// End of the span.
    pub end: NaiveDateTime,
    /// The day being paid. Lunch and shift boundaries are anchored on it.
    pub anchor_date: NaiveDate,
    /// Hourly rate the tiers are multiplied against.
    pub hourly_rate: Decimal,
    /// The employee's scheduled shift.
    pub shift: &'a EffectiveShift,
    /// Whether the anchor date is a public holiday. Applies to every segment,
    /// including those past midnight of an overnight window.
    pub is_public_holiday: bool,
    /// Slice length, lunch window and multipliers.
    pub settings: &'a EngineSettings,
}

/// One slice of the window after lunch deduction and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySegment {
    /// Segment start.
    pub start: NaiveDateTime,
    /// Segment end.
    pub end: NaiveDateTime,
    /// Hours paid for this segment, after the lunch deduction.
    pub payable_hours: Decimal,
    /// The tier the segment is paid at.
    pub tier: RateTier,
}

fn overlap(
    start: NaiveDateTime,
    end: NaiveDateTime,
    other_start: NaiveDateTime,
    other_end: NaiveDateTime,
) -> Duration {
    let overlap_start = start.max(other_start);
    let overlap_end = end.min(other_end);
    if overlap_end > overlap_start {
        overlap_end - overlap_start
    } else {
        Duration::zero()
    }
}

/// Cuts the input span into classified segments.
///
/// Segments that fall entirely inside the lunch window are dropped.
pub fn slice_window(input: &IntervalWageInput<'_>) -> Vec<PaySegment> {
    let mut segments = Vec::new();
    if input.end <= input.start {
        return segments;
    }

    let slice = Duration::minutes(input.settings.slice_minutes.max(1));
    let lunch_start = input.anchor_date.and_time(input.settings.lunch.start);
    let lunch_end = input.anchor_date.and_time(input.settings.lunch.end);
    let (shift_start, shift_end) = input.shift.anchored(input.anchor_date);

    let mut segment_start = input.start;
    while segment_start < input.end {
        let segment_end = (segment_start + slice).min(input.end);
        let payable =
            (segment_end - segment_start) - overlap(segment_start, segment_end, lunch_start, lunch_end);

        if payable > Duration::zero() {
            segments.push(PaySegment {
                start: segment_start,
                end: segment_end,
                payable_hours: Decimal::from(payable.num_seconds()) / SECONDS_PER_HOUR,
                tier: classify_segment(
                    segment_start,
                    input.is_public_holiday,
                    shift_start,
                    shift_end,
                ),
            });
        }

        segment_start = segment_end;
    }

    segments
}

/// Calculates hours and pay for a span of time.
///
/// # Example
///
/// ```
/// use wage_engine::calculation::{calculate_interval_wage, EffectiveShift, IntervalWageInput, ShiftSource};
/// use wage_engine::config::EngineSettings;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// // Thursday, default shift worked exactly, one hour of lunch deducted.
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let settings = EngineSettings::default();
/// let shift = EffectiveShift {
///     start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(16, 45, 0).unwrap(),
///     source: ShiftSource::Global,
/// };
/// let result = calculate_interval_wage(&IntervalWageInput {
///     start: date.and_hms_opt(7, 0, 0).unwrap(),
///     end: date.and_hms_opt(16, 45, 0).unwrap(),
///     anchor_date: date,
///     hourly_rate: Decimal::from(10),
///     shift: &shift,
///     is_public_holiday: false,
///     settings: &settings,
/// });
///
/// assert_eq!(result.total_hours, Decimal::new(875, 2));
/// assert_eq!(result.total_wage, Decimal::new(8750, 2));
/// assert_eq!(result.overtime_hours(), Decimal::ZERO);
/// ```
pub fn calculate_interval_wage(input: &IntervalWageInput<'_>) -> DayWageResult {
    let mut result = DayWageResult::default();
    calculate_interval_wage_into(&mut result, input, false);
    result
}

/// Calculates hours and pay for a span of time into an existing result.
///
/// With `accumulate` set the span's hours and pay are added to what `result`
/// already holds; otherwise `result` is reset first. A negative rate pays
/// nothing; hours are still counted.
pub fn calculate_interval_wage_into(
    result: &mut DayWageResult,
    input: &IntervalWageInput<'_>,
    accumulate: bool,
) {
    if !accumulate {
        *result = DayWageResult::default();
    }

    let rate = input.hourly_rate.max(Decimal::ZERO);
    let multipliers = &input.settings.multipliers;

    for segment in slice_window(input) {
        let pay = segment.payable_hours * rate * segment.tier.multiplier(multipliers);

        result.total_hours += segment.payable_hours;
        result.total_wage += pay;

        match segment.tier {
            RateTier::Ordinary => {}
            RateTier::Overtime15 => {
                result.overtime_hours_15 += segment.payable_hours;
                result.overtime_pay_15 += pay;
            }
            RateTier::Overtime20 => {
                result.overtime_hours_20 += segment.payable_hours;
                result.overtime_pay_20 += pay;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::ShiftSource;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn default_shift() -> EffectiveShift {
        EffectiveShift {
            start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(16, 45, 0).unwrap(),
            source: ShiftSource::Global,
        }
    }

    fn at(date: &str, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn run(
        date: &str,
        start: (u32, u32),
        end: (u32, u32),
        rate: &str,
        is_public_holiday: bool,
    ) -> DayWageResult {
        let settings = EngineSettings::default();
        let shift = default_shift();
        let start = at(date, start.0, start.1);
        calculate_interval_wage(&IntervalWageInput {
            start,
            end: at(date, end.0, end.1),
            anchor_date: start.date(),
            hourly_rate: dec(rate),
            shift: &shift,
            is_public_holiday,
            settings: &settings,
        })
    }

    // 2026-01-15 Thursday, 2026-01-17 Saturday, 2026-01-18 Sunday.

    #[test]
    fn test_default_weekday_shift_is_all_ordinary() {
        let result = run("2026-01-15", (7, 0), (16, 45), "10", false);
        assert_eq!(result.total_hours, dec("8.75"));
        assert_eq!(result.total_wage, dec("87.5"));
        assert_eq!(result.overtime_hours_15, Decimal::ZERO);
        assert_eq!(result.overtime_hours_20, Decimal::ZERO);
    }

    #[test]
    fn test_sunday_is_all_double_time() {
        let result = run("2026-01-18", (7, 0), (16, 0), "10", false);
        assert_eq!(result.total_hours, dec("8"));
        assert_eq!(result.overtime_hours_20, dec("8"));
        assert_eq!(result.total_wage, dec("160"));
        assert_eq!(result.overtime_pay_20, dec("160"));
    }

    #[test]
    fn test_saturday_is_all_time_and_a_half() {
        let result = run("2026-01-17", (8, 0), (12, 0), "10", false);
        assert_eq!(result.total_hours, dec("4"));
        assert_eq!(result.overtime_hours_15, dec("4"));
        assert_eq!(result.total_wage, dec("60"));
    }

    #[test]
    fn test_public_holiday_is_all_double_time() {
        let result = run("2026-01-15", (7, 0), (16, 45), "10", true);
        assert_eq!(result.overtime_hours_20, dec("8.75"));
        assert_eq!(result.total_wage, dec("175"));
    }

    #[test]
    fn test_early_start_is_time_and_a_half() {
        let result = run("2026-01-15", (6, 30), (16, 45), "10", false);
        assert_eq!(result.total_hours, dec("9.25"));
        assert_eq!(result.overtime_hours_15, dec("0.5"));
        assert_eq!(result.overtime_pay_15, dec("7.5"));
        assert_eq!(result.total_wage, dec("95"));
    }

    #[test]
    fn test_late_finish_is_time_and_a_half() {
        let result = run("2026-01-15", (7, 0), (18, 45), "10", false);
        assert_eq!(result.total_hours, dec("10.75"));
        assert_eq!(result.overtime_hours_15, dec("2"));
        assert_eq!(result.overtime_pay_15, dec("30"));
        assert_eq!(result.normal_hours(), dec("8.75"));
    }

    #[test]
    fn test_partial_lunch_overlap_is_prorated() {
        // 11:00-12:30 loses the 30 minutes of lunch it overlaps.
        let result = run("2026-01-15", (11, 0), (12, 30), "10", false);
        assert_eq!(result.total_hours, dec("1"));
    }

    #[test]
    fn test_window_inside_lunch_pays_nothing() {
        let result = run("2026-01-15", (12, 10), (12, 50), "10", false);
        assert!(result.is_zero());
    }

    #[test]
    fn test_last_segment_is_truncated() {
        let result = run("2026-01-15", (7, 0), (7, 20), "12", false);
        let settings = EngineSettings::default();
        let shift = default_shift();
        let segments = slice_window(&IntervalWageInput {
            start: at("2026-01-15", 7, 0),
            end: at("2026-01-15", 7, 20),
            anchor_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            hourly_rate: dec("12"),
            shift: &shift,
            is_public_holiday: false,
            settings: &settings,
        });

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].payable_hours, dec("0.25"));
        assert_eq!(segments[1].end, at("2026-01-15", 7, 20));
        assert_eq!(result.total_wage.round_dp(2), dec("4.00"));
    }

    #[test]
    fn test_inverted_window_is_zero() {
        let result = run("2026-01-15", (16, 0), (8, 0), "10", false);
        assert_eq!(result, DayWageResult::default());
    }

    #[test]
    fn test_zero_rate_counts_hours_but_pays_nothing() {
        let result = run("2026-01-15", (7, 0), (16, 45), "0", false);
        assert_eq!(result.total_hours, dec("8.75"));
        assert_eq!(result.total_wage, Decimal::ZERO);
    }

    #[test]
    fn test_negative_rate_pays_nothing() {
        let result = run("2026-01-15", (7, 0), (8, 0), "-5", false);
        assert_eq!(result.total_wage, Decimal::ZERO);
    }

    #[test]
    fn test_accumulate_adds_to_prior_result() {
        let settings = EngineSettings::default();
        let shift = default_shift();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let morning = IntervalWageInput {
            start: at("2026-01-15", 7, 0),
            end: at("2026-01-15", 11, 0),
            anchor_date: date,
            hourly_rate: dec("10"),
            shift: &shift,
            is_public_holiday: false,
            settings: &settings,
        };
        let evening = IntervalWageInput {
            start: at("2026-01-15", 16, 45),
            end: at("2026-01-15", 17, 45),
            ..morning
        };

        let mut result = DayWageResult::default();
        calculate_interval_wage_into(&mut result, &morning, false);
        calculate_interval_wage_into(&mut result, &evening, true);

        assert_eq!(result.total_hours, dec("5"));
        assert_eq!(result.overtime_hours_15, dec("1"));
        assert_eq!(result.total_wage, dec("55"));

        calculate_interval_wage_into(&mut result, &evening, false);
        assert_eq!(result.total_hours, dec("1"));
    }

    #[test]
    fn test_longer_slices_classify_by_segment_start() {
        let settings = EngineSettings {
            slice_minutes: 60,
            ..Default::default()
        };
        let shift = default_shift();
        // 16:00-17:00 is one segment starting before shift end: all ordinary.
        let result = calculate_interval_wage(&IntervalWageInput {
            start: at("2026-01-15", 16, 0),
            end: at("2026-01-15", 17, 0),
            anchor_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            hourly_rate: dec("10"),
            shift: &shift,
            is_public_holiday: false,
            settings: &settings,
        });
        assert_eq!(result.overtime_hours_15, Decimal::ZERO);
        assert_eq!(result.total_hours, dec("1"));
    }
}
