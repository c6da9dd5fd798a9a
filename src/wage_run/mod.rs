//! Wage run generation and lifecycle.
//!
//! [`generate_wage_lines`] pays every attendance record in a period and
//! consolidates the results into one line per employee. The lines are handed
//! to a draft [`WageRun`](crate::models::WageRun), which owns incentive
//! distribution, manual edits and the one-way move to finalized.

mod aggregator;
mod consolidation;
mod incentives;
mod lifecycle;

pub use aggregator::{AggregationOutcome, PayrollSnapshot, WageRunRequest, generate_wage_lines};
pub use consolidation::{CandidateLine, consolidate_lines, reapply_manual_edits};
pub use incentives::{distribute_incentives, split_evenly};
