//! Attendance record model and related types.
//!
//! An [`AttendanceRecord`] is one clock session as captured by the
//! attendance layer. The engine only ever reads these records.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status recorded against an attendance session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Employee worked as scheduled.
    #[default]
    Present,
    /// Employee did not attend.
    Absent,
    /// Employee arrived after the shift start.
    Late,
    /// Employee was off sick.
    Sick,
    /// Employee left before the end of the shift.
    LeaveEarly,
    /// Employee was on authorized, paid leave.
    LeaveAuthorized,
}

impl AttendanceStatus {
    /// Returns true for statuses that are paid even when no hours were worked.
    pub fn is_paid_absence(&self) -> bool {
        matches!(self, AttendanceStatus::Sick | AttendanceStatus::LeaveAuthorized)
    }
}

/// A medical certificate attached to an attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCertificate {
    /// Name of the uploaded file.
    pub file_name: String,
    /// Whether a supervisor has verified the certificate.
    #[serde(default)]
    pub verified: bool,
}

/// One clock session for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The employee name as captured on the record.
    pub employee_name: String,
    /// The calendar day of the session.
    pub date: NaiveDate,
    /// Raw clock-in timestamp. Without it nothing is computed.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// Raw clock-out timestamp. `None` means the employee is still clocked in.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Status recorded for the session.
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Branch where the session was captured.
    pub branch: String,
    /// Hourly rate snapshot taken when the record was captured.
    #[serde(default)]
    pub cached_hourly_rate: Option<Decimal>,
    /// Free-text reason recorded with the status (e.g. why the employee left early).
    #[serde(default)]
    pub reason: Option<String>,
    /// Medical certificate attached to the record.
    #[serde(default)]
    pub medical_certificate: Option<MedicalCertificate>,
}

impl AttendanceRecord {
    /// Returns true when the employee has clocked in but not yet out.
    ///
    /// # Examples
    ///
    /// ```
    /// use wage_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::NaiveDate;
    ///
    /// let record = AttendanceRecord {
    ///     id: "att_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     employee_name: "Ana Lima".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     clock_in: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(7, 0, 0),
    ///     clock_out: None,
    ///     status: AttendanceStatus::Present,
    ///     branch: "north".to_string(),
    ///     cached_hourly_rate: None,
    ///     reason: None,
    ///     medical_certificate: None,
    /// };
    /// assert!(record.is_still_active());
    /// ```
    pub fn is_still_active(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_none()
    }

    /// Returns true when a verified medical certificate is attached.
    pub fn has_verified_certificate(&self) -> bool {
        self.medical_certificate
            .as_ref()
            .is_some_and(|certificate| certificate.verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(clock_out: Option<NaiveDateTime>) -> AttendanceRecord {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        AttendanceRecord {
            id: "att_001".to_string(),
            employee_id: "emp_001".to_string(),
            employee_name: "Ana Lima".to_string(),
            date,
            clock_in: date.and_hms_opt(7, 0, 0),
            clock_out,
            status: AttendanceStatus::Present,
            branch: "north".to_string(),
            cached_hourly_rate: None,
            reason: None,
            medical_certificate: None,
        }
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "id": "att_001",
            "employee_id": "emp_001",
            "employee_name": "Ana Lima",
            "date": "2026-01-15",
            "clock_in": "2026-01-15T07:00:00",
            "clock_out": "2026-01-15T16:45:00",
            "branch": "north"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert!(record.clock_out.is_some());
        assert!(record.cached_hourly_rate.is_none());
        assert!(!record.is_still_active());
    }

    #[test]
    fn test_missing_clock_out_is_still_active() {
        let record = make_record(None);
        assert!(record.is_still_active());
    }

    #[test]
    fn test_missing_clock_in_is_not_active() {
        let mut record = make_record(None);
        record.clock_in = None;
        assert!(!record.is_still_active());
    }

    #[test]
    fn test_paid_absence_statuses() {
        assert!(AttendanceStatus::Sick.is_paid_absence());
        assert!(AttendanceStatus::LeaveAuthorized.is_paid_absence());
        assert!(!AttendanceStatus::Absent.is_paid_absence());
        assert!(!AttendanceStatus::LeaveEarly.is_paid_absence());
        assert!(!AttendanceStatus::Present.is_paid_absence());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::LeaveEarly).unwrap(),
            "\"leave_early\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::LeaveAuthorized).unwrap(),
            "\"leave_authorized\""
        );
    }

    #[test]
    fn test_unverified_certificate_is_not_verified() {
        let mut record = make_record(None);
        record.medical_certificate = Some(MedicalCertificate {
            file_name: "note.pdf".to_string(),
            verified: false,
        });
        assert!(!record.has_verified_certificate());

        record.medical_certificate = Some(MedicalCertificate {
            file_name: "note.pdf".to_string(),
            verified: true,
        });
        assert!(record.has_verified_certificate());
    }
}
