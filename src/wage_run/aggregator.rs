//! Wage run line generation.
//!
//! Turns a snapshot of employees and attendance into one line per employee
//! for a pay period. Each attendance record is paid independently (in
//! parallel), the results are put into a stable order and then consolidated.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculation::{DayContext, DayWageCalculation, EffectiveShift, calculate_day_wage};
use crate::config::EngineSettings;
use crate::models::{
    AttendanceRecord, AuditWarning, BranchDetails, Employee, PayPeriod, RateType, WageRunLine,
};

use super::consolidation::{CandidateLine, consolidate_lines, normalize_name};

/// What to generate lines for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRunRequest {
    /// The pay period, including its public holidays.
    pub period: PayPeriod,
    /// Only include employees of this branch.
    #[serde(default)]
    pub branch: Option<String>,
    /// Only include employees paid this way.
    #[serde(default)]
    pub rate_type: Option<RateType>,
}

/// Read-only input data for a generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSnapshot {
    /// All known employees.
    pub employees: Vec<Employee>,
    /// Attendance records; records outside the period are ignored.
    pub attendance: Vec<AttendanceRecord>,
    /// Branch shift defaults.
    #[serde(default)]
    pub branches: Vec<BranchDetails>,
}

/// The lines produced by a generation plus any data problems found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationOutcome {
    /// One line per employee identity.
    pub lines: Vec<WageRunLine>,
    /// Non-fatal data integrity warnings.
    pub warnings: Vec<AuditWarning>,
}

struct Candidate {
    sort_name: String,
    record_id: String,
    date: NaiveDate,
    line: WageRunLine,
    worked: bool,
    daily_rate_paid: Decimal,
}

/// Generates wage run lines for a period.
///
/// Records are paid with [`calculate_day_wage`]; the per-record lines are then
/// consolidated so each employee identity appears once. Records whose
/// employee is unknown are skipped with an `UNMATCHED_EMPLOYEE` warning.
///
/// A salaried employee earns the daily rate at most once per date, however
/// many sessions were recorded that day.
pub fn generate_wage_lines(
    request: &WageRunRequest,
    snapshot: &PayrollSnapshot,
    settings: &EngineSettings,
    now: NaiveDateTime,
) -> AggregationOutcome {
    let employees: HashMap<&str, &Employee> = snapshot
        .employees
        .iter()
        .map(|employee| (employee.id.as_str(), employee))
        .collect();

    let mut warnings = Vec::new();
    let mut selected: Vec<(&AttendanceRecord, &Employee)> = Vec::new();

    for record in &snapshot.attendance {
        if !request.period.contains_date(record.date) {
            continue;
        }

        let Some(&employee) = employees.get(record.employee_id.as_str()) else {
            warn!(
                record_id = %record.id,
                employee_id = %record.employee_id,
                "Attendance record references unknown employee"
            );
            warnings.push(AuditWarning::unmatched_employee(&record.id, &record.employee_id));
            continue;
        };

        if !matches_filters(request, employee) {
            continue;
        }

        if record.clock_in.is_none() && !record.status.is_paid_absence() {
            warnings.push(AuditWarning::missing_clock_in(&record.id, &record.employee_id));
        }

        selected.push((record, employee));
    }

    let mut candidates: Vec<Candidate> = selected
        .par_iter()
        .map(|&(record, employee)| {
            let branch = snapshot
                .branches
                .iter()
                .find(|details| details.is_named(&employee.branch));
            let calculation = calculate_day_wage(&DayContext {
                record,
                employee,
                shift: EffectiveShift::resolve(employee, branch, &settings.default_shift),
                is_public_holiday: request.period.is_public_holiday(record.date, &employee.branch),
                settings,
                now,
            });
            candidate_from(record, employee, &calculation)
        })
        .collect();

    candidates.sort_by(compare_candidates);
    pay_daily_rate_once_per_day(&mut candidates);
    warnings.extend(duplicate_id_warnings(&candidates));

    let lines = consolidate_lines(
        candidates
            .into_iter()
            .map(|candidate| CandidateLine {
                date: candidate.date,
                worked: candidate.worked,
                line: candidate.line,
            })
            .collect(),
    );

    info!(
        period_start = %request.period.start_date,
        period_end = %request.period.end_date,
        records = selected.len(),
        lines = lines.len(),
        warnings = warnings.len(),
        "Generated wage run lines"
    );

    AggregationOutcome { lines, warnings }
}

fn matches_filters(request: &WageRunRequest, employee: &Employee) -> bool {
    let branch_matches = request
        .branch
        .as_deref()
        .is_none_or(|branch| branch.trim().eq_ignore_ascii_case(employee.branch.trim()));
    let rate_matches = request
        .rate_type
        .is_none_or(|rate_type| rate_type == employee.rate_type);
    branch_matches && rate_matches
}

fn candidate_from(
    record: &AttendanceRecord,
    employee: &Employee,
    calculation: &DayWageCalculation,
) -> Candidate {
    let result = &calculation.result;
    let mut line = WageRunLine::empty(
        &employee.id,
        &record.employee_name,
        &employee.branch,
        employee.rate_type,
    );

    line.normal_hours = result.normal_hours();
    line.normal_pay = result.normal_pay();
    line.overtime_hours_15 = result.overtime_hours_15;
    line.overtime_pay_15 = result.overtime_pay_15;
    line.overtime_hours_20 = result.overtime_hours_20;
    line.overtime_pay_20 = result.overtime_pay_20;
    line.total_hours = result.total_hours;
    line.total_wage = result.total_wage;
    line.variance_notes = calculation.notes.join(" ");
    line.is_company_housed = employee.is_company_housed;
    line.is_supervisor = employee.is_supervisor;
    line.has_provisional_hours = calculation.is_provisional;

    debug!(
        record_id = %record.id,
        employee_id = %employee.id,
        total_hours = %result.total_hours,
        total_wage = %result.total_wage,
        "Paid attendance record"
    );

    let daily_rate_paid = match employee.rate_type {
        RateType::Salary => calculation.base_pay,
        RateType::Hourly => Decimal::ZERO,
    };

    Candidate {
        sort_name: normalize_name(&record.employee_name),
        record_id: record.id.clone(),
        date: record.date,
        worked: result.total_hours > Decimal::ZERO || result.total_wage > Decimal::ZERO,
        line,
        daily_rate_paid,
    }
}

/// Keeps the salaried daily rate on the first paid record of each
/// (employee id, date) and strips it from later ones.
fn pay_daily_rate_once_per_day(candidates: &mut [Candidate]) {
    let mut paid: HashSet<(String, NaiveDate)> = HashSet::new();
    for candidate in candidates.iter_mut() {
        if candidate.daily_rate_paid <= Decimal::ZERO {
            continue;
        }
        let key = (candidate.line.employee_id.clone(), candidate.date);
        if paid.insert(key) {
            continue;
        }

        let daily_rate = candidate.daily_rate_paid;
        candidate.line.normal_pay -= daily_rate;
        candidate.line.total_wage -= daily_rate;
        candidate.daily_rate_paid = Decimal::ZERO;
        debug!(
            record_id = %candidate.record_id,
            employee_id = %candidate.line.employee_id,
            date = %candidate.date,
            "Daily rate already paid for this date"
        );
    }
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.sort_name
        .cmp(&b.sort_name)
        .then_with(|| a.line.employee_id.cmp(&b.line.employee_id))
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.record_id.cmp(&b.record_id))
}

fn duplicate_id_warnings(candidates: &[Candidate]) -> Vec<AuditWarning> {
    let mut names_by_id: HashMap<&str, Vec<&str>> = HashMap::new();
    for candidate in candidates {
        let names = names_by_id
            .entry(candidate.line.employee_id.as_str())
            .or_default();
        if !names.contains(&candidate.sort_name.as_str()) {
            names.push(candidate.sort_name.as_str());
        }
    }

    let mut ids: Vec<&str> = names_by_id
        .iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(id, _)| *id)
        .collect();
    ids.sort_unstable();

    ids.into_iter()
        .map(|id| {
            warn!(employee_id = %id, "Attendance names differ for one employee id");
            AuditWarning::duplicate_employee_id(id, names_by_id[id].len())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, PublicHoliday};
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn make_period() -> PayPeriod {
        PayPeriod {
            start_date: date(12),
            end_date: date(18),
            public_holidays: vec![],
        }
    }

    fn make_employee(id: &str, name: &str, rate_type: RateType, branch: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            rate_type,
            hourly_rate: Some(dec("10")),
            monthly_salary: Some(dec("2167")),
            shift_start: None,
            shift_end: None,
            branch: branch.to_string(),
            is_company_housed: false,
            is_supervisor: false,
        }
    }

    fn make_record(id: &str, employee_id: &str, name: &str, day: u32) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            employee_name: name.to_string(),
            date: date(day),
            clock_in: date(day).and_hms_opt(7, 0, 0),
            clock_out: date(day).and_hms_opt(16, 45, 0),
            status: AttendanceStatus::Present,
            branch: "north".to_string(),
            cached_hourly_rate: None,
            reason: None,
            medical_certificate: None,
        }
    }

    fn make_request() -> WageRunRequest {
        WageRunRequest {
            period: make_period(),
            branch: None,
            rate_type: None,
        }
    }

    fn now() -> NaiveDateTime {
        date(18).and_hms_opt(23, 0, 0).unwrap()
    }

    fn generate(request: &WageRunRequest, snapshot: &PayrollSnapshot) -> AggregationOutcome {
        generate_wage_lines(request, snapshot, &EngineSettings::default(), now())
    }

    #[test]
    fn test_one_line_per_employee_over_period() {
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![
                make_record("att_1", "emp_001", "Ana Lima", 12),
                make_record("att_2", "emp_001", "Ana Lima", 13),
                make_record("att_3", "emp_001", "Ana Lima", 14),
            ],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);

        assert_eq!(outcome.lines.len(), 1);
        let line = &outcome.lines[0];
        assert_eq!(line.days_worked, 3);
        assert_eq!(line.total_hours, dec("26.25"));
        assert_eq!(line.total_wage, dec("262.5"));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_records_outside_period_are_skipped() {
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![
                make_record("att_1", "emp_001", "Ana Lima", 11),
                make_record("att_2", "emp_001", "Ana Lima", 12),
                make_record("att_3", "emp_001", "Ana Lima", 19),
            ],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        assert_eq!(outcome.lines[0].days_worked, 1);
    }

    #[test]
    fn test_unmatched_employee_is_warned_and_excluded() {
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![
                make_record("att_1", "emp_001", "Ana Lima", 12),
                make_record("att_2", "emp_404", "Ghost", 12),
            ],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].code, "UNMATCHED_EMPLOYEE");
        assert!(outcome.warnings[0].message.contains("att_2"));
    }

    #[test]
    fn test_branch_and_rate_filters() {
        let snapshot = PayrollSnapshot {
            employees: vec![
                make_employee("emp_001", "Ana Lima", RateType::Hourly, "north"),
                make_employee("emp_002", "Bo Chen", RateType::Salary, "north"),
                make_employee("emp_003", "Cy Diaz", RateType::Hourly, "south"),
            ],
            attendance: vec![
                make_record("att_1", "emp_001", "Ana Lima", 12),
                make_record("att_2", "emp_002", "Bo Chen", 12),
                make_record("att_3", "emp_003", "Cy Diaz", 12),
            ],
            branches: vec![],
        };

        let mut request = make_request();
        request.branch = Some("North".to_string());
        request.rate_type = Some(RateType::Hourly);

        let outcome = generate(&request, &snapshot);
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(outcome.lines[0].employee_id, "emp_001");
    }

    #[test]
    fn test_lines_are_ordered_by_name_then_id() {
        let snapshot = PayrollSnapshot {
            employees: vec![
                make_employee("emp_002", "Zed Young", RateType::Hourly, "north"),
                make_employee("emp_001", "Ana Lima", RateType::Hourly, "north"),
            ],
            attendance: vec![
                make_record("att_2", "emp_002", "Zed Young", 12),
                make_record("att_1", "emp_001", "Ana Lima", 12),
            ],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        let names: Vec<&str> = outcome.lines.iter().map(|l| l.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Ana Lima", "Zed Young"]);
    }

    #[test]
    fn test_differing_names_for_one_id_stay_separate_with_warning() {
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![
                make_record("att_1", "emp_001", "Ana Lima", 12),
                make_record("att_2", "emp_001", "Ana M. Lima", 13),
            ],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        assert_eq!(outcome.lines.len(), 2);
        assert_eq!(outcome.warnings[0].code, "DUPLICATE_EMPLOYEE_ID");
    }

    #[test]
    fn test_public_holiday_for_employee_branch_pays_double() {
        let mut request = make_request();
        request.period.public_holidays = vec![PublicHoliday {
            date: date(14),
            name: "Founders Day".to_string(),
            branch: Some("north".to_string()),
        }];
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![make_record("att_1", "emp_001", "Ana Lima", 14)],
            branches: vec![],
        };

        let outcome = generate(&request, &snapshot);
        assert_eq!(outcome.lines[0].overtime_hours_20, dec("8.75"));
        assert_eq!(outcome.lines[0].total_wage, dec("175"));
    }

    #[test]
    fn test_branch_shift_defaults_apply() {
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![make_record("att_1", "emp_001", "Ana Lima", 12)],
            branches: vec![BranchDetails {
                name: "north".to_string(),
                shift_start: NaiveTime::from_hms_opt(7, 0, 0),
                shift_end: NaiveTime::from_hms_opt(15, 0, 0),
            }],
        };

        let outcome = generate(&make_request(), &snapshot);
        // 15:00-16:45 is late overtime against the branch shift.
        assert_eq!(outcome.lines[0].overtime_hours_15, dec("1.75"));
    }

    #[test]
    fn test_still_active_record_marks_line_provisional() {
        let mut record = make_record("att_1", "emp_001", "Ana Lima", 18);
        record.clock_out = None;
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![record],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        assert!(outcome.lines[0].has_provisional_hours);
        assert!(outcome.lines[0].variance_notes.contains("provisional"));
    }

    #[test]
    fn test_missing_clock_in_is_warned() {
        let mut record = make_record("att_1", "emp_001", "Ana Lima", 12);
        record.clock_in = None;
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_001", "Ana Lima", RateType::Hourly, "north")],
            attendance: vec![record],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        assert_eq!(outcome.warnings[0].code, "MISSING_CLOCK_IN");
        assert_eq!(outcome.lines[0].total_wage, Decimal::ZERO);
        assert_eq!(outcome.lines[0].days_worked, 0);
    }

    #[test]
    fn test_salaried_split_shift_pays_daily_rate_once() {
        let mut morning = make_record("att_1", "emp_002", "Bo Chen", 15);
        morning.clock_out = date(15).and_hms_opt(12, 0, 0);
        let mut afternoon = make_record("att_2", "emp_002", "Bo Chen", 15);
        afternoon.clock_in = date(15).and_hms_opt(13, 0, 0);
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_002", "Bo Chen", RateType::Salary, "north")],
            attendance: vec![morning, afternoon],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        let line = &outcome.lines[0];
        // 2167 / 21.67 = 100, paid once for the day.
        assert_eq!(line.total_wage, dec("100"));
        assert_eq!(line.normal_pay, dec("100"));
        assert_eq!(line.total_hours, dec("8.75"));
        assert_eq!(line.days_worked, 1);
    }

    #[test]
    fn test_salaried_daily_rate_paid_by_later_record_when_first_is_unpaid() {
        let mut absent = make_record("att_1", "emp_002", "Bo Chen", 15);
        absent.clock_in = None;
        absent.clock_out = None;
        absent.status = AttendanceStatus::Absent;
        let worked = make_record("att_2", "emp_002", "Bo Chen", 15);
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_002", "Bo Chen", RateType::Salary, "north")],
            attendance: vec![absent, worked],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        assert_eq!(outcome.lines[0].total_wage, dec("100"));
    }

    #[test]
    fn test_salaried_daily_rate_paid_on_each_distinct_date() {
        let snapshot = PayrollSnapshot {
            employees: vec![make_employee("emp_002", "Bo Chen", RateType::Salary, "north")],
            attendance: vec![
                make_record("att_1", "emp_002", "Bo Chen", 14),
                make_record("att_2", "emp_002", "Bo Chen", 15),
            ],
            branches: vec![],
        };

        let outcome = generate(&make_request(), &snapshot);
        assert_eq!(outcome.lines[0].total_wage, dec("200"));
    }

    #[test]
    fn test_overnight_shift_takes_clock_in_date_holiday_status() {
        let mut request = make_request();
        request.period.public_holidays = vec![PublicHoliday {
            date: date(15),
            name: "Founders Day".to_string(),
            branch: None,
        }];
        // Wednesday 22:00 into the holiday, then the holiday night into Friday.
        let mut into_holiday = make_record("att_1", "emp_001", "Ana Lima", 14);
        into_holiday.clock_in = date(14).and_hms_opt(22, 0, 0);
        into_holiday.clock_out = date(15).and_hms_opt(2, 0, 0);
        let mut out_of_holiday = make_record("att_2", "emp_003", "Cy Diaz", 15);
        out_of_holiday.clock_in = date(15).and_hms_opt(22, 0, 0);
        out_of_holiday.clock_out = date(16).and_hms_opt(2, 0, 0);
        let snapshot = PayrollSnapshot {
            employees: vec![
                make_employee("emp_001", "Ana Lima", RateType::Hourly, "north"),
                make_employee("emp_003", "Cy Diaz", RateType::Hourly, "north"),
            ],
            attendance: vec![into_holiday, out_of_holiday],
            branches: vec![],
        };

        let outcome = generate(&request, &snapshot);
        let ana = &outcome.lines[0];
        assert_eq!(ana.overtime_hours_15, dec("4"));
        assert_eq!(ana.overtime_hours_20, Decimal::ZERO);
        let cy = &outcome.lines[1];
        assert_eq!(cy.overtime_hours_20, dec("4"));
        assert_eq!(cy.overtime_hours_15, Decimal::ZERO);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let snapshot = PayrollSnapshot {
            employees: vec![
                make_employee("emp_001", "Ana Lima", RateType::Hourly, "north"),
                make_employee("emp_002", "Bo Chen", RateType::Salary, "north"),
            ],
            attendance: (12..=16)
                .flat_map(|day| {
                    vec![
                        make_record(&format!("a{}", day), "emp_001", "Ana Lima", day),
                        make_record(&format!("b{}", day), "emp_002", "Bo Chen", day),
                    ]
                })
                .collect(),
            branches: vec![],
        };

        let first = generate(&make_request(), &snapshot);
        let second = generate(&make_request(), &snapshot);
        assert_eq!(first, second);
    }
}
