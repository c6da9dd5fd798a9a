//! Run-wide incentive and charge distribution.
//!
//! - The gas total is split evenly across company-housed lines. Shares are
//!   rounded down to the cent and the leftover cents go one each to the first
//!   lines, so the shares always add up to the total.
//! - The washing fee is charged flatly to every company-housed line.
//! - The supervisor fee is paid flatly to every supervisor line.
//!
//! Manual per-line edits are written last and win over distributed values.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{IncentiveSettings, WageRunLine};

const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Splits `total` into `parts` shares that sum exactly to `total`.
///
/// # Example
///
/// ```
/// use wage_engine::wage_run::split_evenly;
/// use rust_decimal::Decimal;
///
/// let shares = split_evenly(Decimal::new(100, 0), 3);
/// assert_eq!(shares, vec![Decimal::new(3334, 2), Decimal::new(3333, 2), Decimal::new(3333, 2)]);
/// ```
pub fn split_evenly(total: Decimal, parts: usize) -> Vec<Decimal> {
    if parts == 0 {
        return Vec::new();
    }

    let count = Decimal::from(parts as u64);
    let base = (total / count).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let mut shares = vec![base; parts];

    let mut remainder = total - base * count;
    for share in shares.iter_mut() {
        if remainder < CENT {
            break;
        }
        *share += CENT;
        remainder -= CENT;
    }
    // Sub-cent precision in the total lands on the first share.
    if let Some(first) = shares.first_mut() {
        *first += remainder;
    }

    shares
}

/// Applies the run's incentive settings to every line, then each line's manual edits.
pub fn distribute_incentives(lines: &mut [WageRunLine], settings: &IncentiveSettings) {
    let housed = lines.iter().filter(|line| line.is_company_housed).count();
    let mut gas_shares = split_evenly(settings.gas_total, housed).into_iter();

    for line in lines.iter_mut() {
        if line.is_company_housed {
            line.gas_charge = gas_shares.next().unwrap_or(Decimal::ZERO);
            line.washing_fee = settings.washing_fee;
        } else {
            line.gas_charge = Decimal::ZERO;
            line.washing_fee = Decimal::ZERO;
        }

        line.supervisor_incentive = if line.is_supervisor {
            settings.supervisor_fee
        } else {
            Decimal::ZERO
        };

        line.apply_manual_edits();
    }
}
