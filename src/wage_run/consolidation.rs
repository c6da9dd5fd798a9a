//! Consolidation of per-record candidate lines into one line per employee.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::models::{LineAdjustments, WageRunLine};

/// A line computed from a single attendance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLine {
    /// The attendance date the line was computed for.
    pub date: NaiveDate,
    /// True when the record contributed hours or pay.
    pub worked: bool,
    /// The single-record line.
    pub line: WageRunLine,
}

/// Normalizes an employee name for grouping.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Merges candidate lines that share an identity.
///
/// Lines are grouped by trimmed, lowercased employee name together with the
/// employee id. Numeric fields sum, flags are OR'd and variance notes are
/// space-joined. `days_worked` counts distinct dates that contributed. Output
/// keeps the order in which each identity was first seen.
pub fn consolidate_lines(candidates: Vec<CandidateLine>) -> Vec<WageRunLine> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut lines: Vec<WageRunLine> = Vec::new();
    let mut worked_dates: Vec<BTreeSet<NaiveDate>> = Vec::new();

    for candidate in candidates {
        let key = (
            normalize_name(&candidate.line.employee_name),
            candidate.line.employee_id.clone(),
        );

        let position = match index.get(&key) {
            Some(&position) => {
                merge_into(&mut lines[position], &candidate.line);
                position
            }
            None => {
                index.insert(key, lines.len());
                let mut line = candidate.line;
                line.days_worked = 0;
                lines.push(line);
                worked_dates.push(BTreeSet::new());
                lines.len() - 1
            }
        };

        if candidate.worked {
            worked_dates[position].insert(candidate.date);
        }
    }

    for (line, dates) in lines.iter_mut().zip(worked_dates) {
        line.days_worked = dates.len() as u32;
        line.variance_notes = line.variance_notes.trim().to_string();
    }

    lines
}

fn merge_into(target: &mut WageRunLine, other: &WageRunLine) {
    target.normal_hours += other.normal_hours;
    target.normal_pay += other.normal_pay;
    target.overtime_hours_15 += other.overtime_hours_15;
    target.overtime_pay_15 += other.overtime_pay_15;
    target.overtime_hours_20 += other.overtime_hours_20;
    target.overtime_pay_20 += other.overtime_pay_20;
    target.total_hours += other.total_hours;
    target.total_wage += other.total_wage;
    target.loan_deduction += other.loan_deduction;
    target.tax_deduction += other.tax_deduction;
    target.washing_fee += other.washing_fee;
    target.gas_charge += other.gas_charge;
    target.other_deduction += other.other_deduction;
    target.supervisor_incentive += other.supervisor_incentive;

    if !other.variance_notes.trim().is_empty() {
        target.variance_notes = format!(
            "{} {}",
            target.variance_notes.trim(),
            other.variance_notes.trim()
        );
    }

    target.is_company_housed |= other.is_company_housed;
    target.is_supervisor |= other.is_supervisor;
    target.has_provisional_hours |= other.has_provisional_hours;
    target.manual_edits.merge(&other.manual_edits);
}

/// Carries manual edits from a previous generation onto freshly generated lines.
///
/// Edits follow the line identity (normalized name plus employee id). When
/// the name changed between generations the edits still follow the id, but
/// only if the id maps to exactly one line on both sides. The fresh line's
/// own edits are applied last, then the merged edits are written onto it.
pub fn reapply_manual_edits(lines: &mut [WageRunLine], previous: &[WageRunLine]) {
    let previous_per_id = lines_per_id(previous);
    let fresh_per_id = lines_per_id(lines);

    for line in lines.iter_mut() {
        let name = normalize_name(&line.employee_name);
        let mut sources: Vec<&WageRunLine> = previous
            .iter()
            .filter(|old| old.employee_id == line.employee_id)
            .filter(|old| normalize_name(&old.employee_name) == name)
            .collect();

        let id = line.employee_id.as_str();
        if sources.is_empty()
            && previous_per_id.get(id) == Some(&1)
            && fresh_per_id.get(id) == Some(&1)
        {
            sources.extend(previous.iter().filter(|old| old.employee_id == id));
        }

        let mut edits = sources
            .into_iter()
            .fold(LineAdjustments::default(), |mut merged, old| {
                merged.merge(&old.manual_edits);
                merged
            });
        edits.merge(&line.manual_edits);
        line.manual_edits = edits;
        line.apply_manual_edits();
    }
}

fn lines_per_id(lines: &[WageRunLine]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for line in lines {
        *counts.entry(line.employee_id.clone()).or_insert(0) += 1;
    }
    counts
}
