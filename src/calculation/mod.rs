//! Calculation logic for the wage engine.
//!
//! The pipeline for one attendance record runs bottom-up through these
//! modules: shift resolution, effective window snapping, interval slicing into
//! rate tiers, sick continuation, and finally the per-employee strategy that
//! turns the interval result into the day's wage.

mod day_type;
mod employee_strategy;
mod interval_wage;
mod shift_resolution;
mod sick_continuation;
mod time_window;

pub use day_type::{DayType, RateTier, classify_segment, get_day_type};
pub use employee_strategy::{
    DayContext, DayWageCalculation, SALARY_HOURS_PER_DAY, SALARY_WORKING_DAYS_PER_MONTH,
    calculate_day_wage,
};
pub use interval_wage::{
    DEFAULT_SLICE_MINUTES, IntervalWageInput, PaySegment, calculate_interval_wage,
    calculate_interval_wage_into, slice_window,
};
pub use shift_resolution::{EffectiveShift, ShiftSource};
pub use sick_continuation::{
    ContinuationOutcome, apply_sick_continuation, indicates_illness, qualifies_for_continuation,
};
pub use time_window::{DEFAULT_SNAP_TOLERANCE_MINUTES, EffectiveWindow, resolve_effective_window};
