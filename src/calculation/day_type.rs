//! Day type detection and rate tier classification.
//!
//! This module decides which pay tier a single time segment falls into. The
//! rules are checked in priority order and the first match wins:
//!
//! 1. Public holiday: double time
//! 2. Sunday: double time
//! 3. Saturday: time-and-a-half
//! 4. Segment starts at or after the shift end: time-and-a-half (late overtime)
//! 5. Segment starts before the shift start: time-and-a-half (early overtime)
//! 6. Otherwise: ordinary time

use chrono::{Datelike, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TierMultipliers;

/// Represents the type of day for rate calculation.
///
/// # Example
///
/// ```
/// use wage_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(day_type.to_string(), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// A public holiday, whatever day of the week it falls on.
    PublicHoliday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::PublicHoliday => write!(f, "Public Holiday"),
        }
    }
}

/// Determines the day type for a given datetime.
///
/// # Example
///
/// ```
/// use wage_engine::calculation::{get_day_type, DayType};
/// use chrono::NaiveDateTime;
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDateTime::parse_from_str("2026-01-17 15:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(get_day_type(saturday, false), DayType::Saturday);
/// assert_eq!(get_day_type(saturday, true), DayType::PublicHoliday);
/// ```
pub fn get_day_type(datetime: NaiveDateTime, is_public_holiday: bool) -> DayType {
    if is_public_holiday {
        return DayType::PublicHoliday;
    }
    match datetime.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// The pay tier a segment is paid at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    /// Ordinary time.
    Ordinary,
    /// Time-and-a-half.
    Overtime15,
    /// Double time.
    Overtime20,
}

impl RateTier {
    /// Returns the configured multiplier for this tier.
    pub fn multiplier(&self, multipliers: &TierMultipliers) -> Decimal {
        match self {
            RateTier::Ordinary => multipliers.ordinary,
            RateTier::Overtime15 => multipliers.overtime_15,
            RateTier::Overtime20 => multipliers.overtime_20,
        }
    }
}

/// Classifies the segment starting at `segment_start` into a rate tier.
///
/// `shift_start` and `shift_end` are the scheduled shift boundaries anchored
/// on the day being paid.
pub fn classify_segment(
    segment_start: NaiveDateTime,
    is_public_holiday: bool,
    shift_start: NaiveDateTime,
    shift_end: NaiveDateTime,
) -> RateTier {
    match get_day_type(segment_start, is_public_holiday) {
        DayType::PublicHoliday | DayType::Sunday => RateTier::Overtime20,
        DayType::Saturday => RateTier::Overtime15,
        DayType::Weekday if segment_start >= shift_end => RateTier::Overtime15,
        DayType::Weekday if segment_start < shift_start => RateTier::Overtime15,
        DayType::Weekday => RateTier::Ordinary,
    }
}
