//! Draft and finalized wage runs.
//!
//! A run starts as a draft. Drafts can be regenerated, edited and saved any
//! number of times. Finalizing is one-way: every mutator on a finalized run
//! returns [`EngineError::WageRunFinalized`].

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    IncentiveSettings, LineAdjustments, PayPeriod, WageRun, WageRunLine, WageRunStatus,
};

use super::consolidation::{normalize_name, reapply_manual_edits};
use super::incentives::distribute_incentives;

impl WageRun {
    /// Creates an empty draft for a period.
    ///
    /// # Example
    ///
    /// ```
    /// use wage_engine::models::{PayPeriod, WageRun, WageRunStatus};
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod {
    ///     start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
    ///     public_holidays: vec![],
    /// };
    /// let run = WageRun::new_draft(period);
    /// assert_eq!(run.status(), WageRunStatus::Draft);
    /// assert!(run.lines().is_empty());
    /// ```
    pub fn new_draft(period: PayPeriod) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            status: WageRunStatus::Draft,
            lines: Vec::new(),
            incentives: IncentiveSettings::default(),
            grand_total: Decimal::ZERO,
            created_at: Utc::now(),
            last_saved_at: None,
            finalized_at: None,
        }
    }

    /// Returns true once the run has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.status == WageRunStatus::Finalized
    }

    fn ensure_draft(&self) -> EngineResult<()> {
        if self.is_finalized() {
            return Err(EngineError::WageRunFinalized { run_id: self.id });
        }
        Ok(())
    }

    /// Replaces the lines with a fresh generation.
    ///
    /// Manual edits already entered on this draft are carried onto the new
    /// lines by line identity, then incentives are redistributed.
    pub fn regenerate(&mut self, lines: Vec<WageRunLine>) -> EngineResult<()> {
        self.ensure_draft()?;

        let mut lines = lines;
        reapply_manual_edits(&mut lines, &self.lines);
        self.lines = lines;
        self.redistribute();

        info!(
            run_id = %self.id,
            lines = self.lines.len(),
            grand_total = %self.grand_total,
            "Regenerated wage run"
        );
        Ok(())
    }

    /// Records manual edits for an employee's line.
    ///
    /// Fields set in `adjustments` replace earlier edits; fields left `None`
    /// keep whatever was there. When the id is shared by several lines the
    /// edit is rejected with [`EngineError::AmbiguousLine`]; use
    /// [`WageRun::update_named_line`] to pick one.
    pub fn update_line(
        &mut self,
        employee_id: &str,
        adjustments: LineAdjustments,
    ) -> EngineResult<&WageRunLine> {
        self.ensure_draft()?;
        adjustments.validate()?;

        let matching: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.employee_id == employee_id)
            .map(|(position, _)| position)
            .collect();

        match matching.as_slice() {
            [] => Err(EngineError::LineNotFound {
                employee_id: employee_id.to_string(),
            }),
            [position] => Ok(self.apply_edits_at(*position, &adjustments)),
            _ => Err(EngineError::AmbiguousLine {
                employee_id: employee_id.to_string(),
                line_count: matching.len(),
            }),
        }
    }

    /// Records manual edits for the line of one employee identity.
    ///
    /// The name is compared trimmed and case-insensitively, the same way
    /// lines are grouped during consolidation.
    pub fn update_named_line(
        &mut self,
        employee_id: &str,
        employee_name: &str,
        adjustments: LineAdjustments,
    ) -> EngineResult<&WageRunLine> {
        self.ensure_draft()?;
        adjustments.validate()?;

        let name = normalize_name(employee_name);
        let position = self
            .lines
            .iter()
            .position(|line| {
                line.employee_id == employee_id && normalize_name(&line.employee_name) == name
            })
            .ok_or_else(|| EngineError::LineNotFound {
                employee_id: employee_id.to_string(),
            })?;

        Ok(self.apply_edits_at(position, &adjustments))
    }

    fn apply_edits_at(&mut self, position: usize, adjustments: &LineAdjustments) -> &WageRunLine {
        let line = &mut self.lines[position];
        line.manual_edits.merge(adjustments);
        line.apply_manual_edits();
        self.recompute_grand_total();
        &self.lines[position]
    }

    /// Sets the gas bill shared by company-housed lines.
    pub fn set_gas_total(&mut self, amount: Decimal) -> EngineResult<()> {
        self.ensure_draft()?;
        validate_amount("gas_total", amount)?;
        self.incentives.gas_total = amount;
        self.redistribute();
        Ok(())
    }

    /// Sets the flat washing fee for company-housed lines.
    pub fn set_washing_fee(&mut self, amount: Decimal) -> EngineResult<()> {
        self.ensure_draft()?;
        validate_amount("washing_fee", amount)?;
        self.incentives.washing_fee = amount;
        self.redistribute();
        Ok(())
    }

    /// Sets the flat supervisor incentive.
    pub fn set_supervisor_fee(&mut self, amount: Decimal) -> EngineResult<()> {
        self.ensure_draft()?;
        validate_amount("supervisor_fee", amount)?;
        self.incentives.supervisor_fee = amount;
        self.redistribute();
        Ok(())
    }

    /// Stamps the save time and returns the draft as a value for storage.
    pub fn save_draft(&mut self) -> EngineResult<WageRun> {
        self.ensure_draft()?;
        self.last_saved_at = Some(Utc::now());
        info!(run_id = %self.id, lines = self.lines.len(), "Saved wage run draft");
        Ok(self.clone())
    }

    /// Locks the run.
    ///
    /// Fails if the run has no lines, or if any line still includes hours
    /// from a session that has not been clocked out.
    pub fn finalize(&mut self) -> EngineResult<()> {
        self.ensure_draft()?;

        if self.lines.is_empty() {
            return Err(EngineError::EmptyWageRun { run_id: self.id });
        }
        if let Some(line) = self.lines.iter().find(|line| line.has_provisional_hours) {
            return Err(EngineError::ProvisionalAttendance {
                employee_id: line.employee_id.clone(),
            });
        }

        self.recompute_grand_total();
        self.status = WageRunStatus::Finalized;
        self.finalized_at = Some(Utc::now());

        info!(
            run_id = %self.id,
            lines = self.lines.len(),
            grand_total = %self.grand_total,
            "Finalized wage run"
        );
        Ok(())
    }

    fn redistribute(&mut self) {
        distribute_incentives(&mut self.lines, &self.incentives);
        self.recompute_grand_total();
    }

    fn recompute_grand_total(&mut self) {
        self.grand_total = self.lines.iter().map(WageRunLine::net_pay).sum();
    }
}

fn validate_amount(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAdjustment {
            field: field.to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(())
}
