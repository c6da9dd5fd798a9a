//! Request types for the wage engine API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceRecord, BranchDetails, Employee, IncentiveSettings, PublicHoliday,
};
use crate::wage_run::{PayrollSnapshot, WageRunRequest};

/// Request body for `POST /day-wage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayWageRequest {
    /// The employee being paid.
    pub employee: Employee,
    /// The attendance record to pay.
    pub record: AttendanceRecord,
    /// Holidays to check the record's date against.
    #[serde(default)]
    pub public_holidays: Vec<PublicHoliday>,
    /// Branch shift defaults; when absent the configured branch is used.
    #[serde(default)]
    pub branch: Option<BranchDetails>,
    /// End of a session that has not been clocked out; defaults to the server's local time.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

impl DayWageRequest {
    /// Returns true if any supplied holiday applies to the record's date and the employee's branch.
    pub fn is_public_holiday(&self) -> bool {
        self.public_holidays
            .iter()
            .any(|holiday| holiday.applies_to(self.record.date, &self.employee.branch))
    }
}

/// Request body for `POST /wage-runs/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageRunPreviewRequest {
    /// Period and filters.
    pub request: WageRunRequest,
    /// All known employees.
    pub employees: Vec<Employee>,
    /// Attendance to pay.
    pub attendance: Vec<AttendanceRecord>,
    /// Extra holidays, added to those already on the period.
    #[serde(default)]
    pub public_holidays: Vec<PublicHoliday>,
    /// Branch shift defaults; when empty the configured branches are used.
    #[serde(default)]
    pub branches: Vec<BranchDetails>,
    /// Incentive settings for the draft.
    #[serde(default)]
    pub incentives: IncentiveSettings,
    /// End of sessions that have not been clocked out; defaults to the server's local time.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

impl WageRunPreviewRequest {
    /// Splits the body into the generation request and its input snapshot.
    pub fn into_parts(
        self,
        configured_branches: &[BranchDetails],
    ) -> (WageRunRequest, PayrollSnapshot, IncentiveSettings) {
        let mut request = self.request;
        request.period.public_holidays.extend(self.public_holidays);

        let branches = if self.branches.is_empty() {
            configured_branches.to_vec()
        } else {
            self.branches
        };

        let snapshot = PayrollSnapshot {
            employees: self.employees,
            attendance: self.attendance,
            branches,
        };

        (request, snapshot, self.incentives)
    }
}
