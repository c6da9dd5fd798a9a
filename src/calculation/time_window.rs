//! Effective time window resolution.
//!
//! Raw clock times drift by a few minutes around shift boundaries. This module
//! snaps them onto the scheduled shift when they fall within the snap tolerance
//! and produces the window that is actually paid.
//!
//! - A clock-in at most `tolerance` minutes before the shift start snaps to the
//!   shift start. Earlier arrivals keep their raw time and earn early overtime.
//! - A clock-out within `tolerance` minutes either side of the shift end snaps
//!   to the shift end. Anything further out keeps its raw time.
//! - A missing clock-out means the employee is still clocked in: the window is
//!   provisional and ends at `now`.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calculation::EffectiveShift;
use crate::models::AttendanceRecord;

/// Default snap tolerance around shift boundaries, in minutes.
pub const DEFAULT_SNAP_TOLERANCE_MINUTES: i64 = 15;

/// The paid span of an attendance session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveWindow {
    /// Effective start after snapping.
    pub start: NaiveDateTime,
    /// Effective end after snapping.
    pub end: NaiveDateTime,
    /// True when the end is "now" because the employee has not clocked out.
    pub is_provisional: bool,
    /// True when the start was snapped onto the shift start.
    pub start_snapped: bool,
    /// True when the end was snapped onto the shift end.
    pub end_snapped: bool,
}

impl EffectiveWindow {
    /// Length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Resolves the effective window for an attendance record.
///
/// Returns `None` when there is nothing to pay: no clock-in, or an end at or
/// before the start.
///
/// # Example
///
/// ```
/// use wage_engine::calculation::{resolve_effective_window, EffectiveShift, ShiftSource};
/// use wage_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let record = AttendanceRecord {
///     id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     employee_name: "Ana Lima".to_string(),
///     date,
///     clock_in: date.and_hms_opt(6, 50, 0),
///     clock_out: date.and_hms_opt(16, 55, 0),
///     status: AttendanceStatus::Present,
///     branch: "north".to_string(),
///     cached_hourly_rate: None,
///     reason: None,
///     medical_certificate: None,
/// };
/// let shift = EffectiveShift {
///     start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(16, 45, 0).unwrap(),
///     source: ShiftSource::Global,
/// };
///
/// let now = date.and_hms_opt(23, 0, 0).unwrap();
/// let window = resolve_effective_window(&record, &shift, 15, now).unwrap();
/// assert_eq!(window.start, date.and_hms_opt(7, 0, 0).unwrap());
/// assert_eq!(window.end, date.and_hms_opt(16, 45, 0).unwrap());
/// ```
pub fn resolve_effective_window(
    record: &AttendanceRecord,
    shift: &EffectiveShift,
    snap_tolerance_minutes: i64,
    now: NaiveDateTime,
) -> Option<EffectiveWindow> {
    let clock_in = record.clock_in?;
    let (raw_end, is_provisional) = match record.clock_out {
        Some(clock_out) => (clock_out, false),
        None => (now, true),
    };

    let tolerance = Duration::minutes(snap_tolerance_minutes.max(0));
    let (shift_start, shift_end) = shift.anchored(clock_in.date());

    let start_snapped = clock_in <= shift_start && shift_start - clock_in <= tolerance;
    let start = if start_snapped { shift_start } else { clock_in };

    let drift = if raw_end >= shift_end {
        raw_end - shift_end
    } else {
        shift_end - raw_end
    };
    let end_snapped = drift <= tolerance;
    let end = if end_snapped { shift_end } else { raw_end };

    if end <= start {
        return None;
    }

    Some(EffectiveWindow {
        start,
        end,
        is_provisional,
        start_snapped,
        end_snapped,
    })
}
