//! Pay period and public holiday models.
//!
//! This module contains the [`PayPeriod`] and [`PublicHoliday`] types that
//! bound a wage run and classify the days inside it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A public holiday. Work on a holiday is paid at the double-time tier.
///
/// A holiday without a branch applies company-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "New Year's Day").
    pub name: String,
    /// Restricts the holiday to one branch.
    #[serde(default)]
    pub branch: Option<String>,
}

impl PublicHoliday {
    /// Returns true if this holiday applies to the given branch on the given date.
    pub fn applies_to(&self, date: NaiveDate, branch: &str) -> bool {
        self.date == date
            && self
                .branch
                .as_deref()
                .is_none_or(|holiday_branch| holiday_branch.eq_ignore_ascii_case(branch))
    }
}

/// Represents a pay period with its date range and associated public holidays.
///
/// # Example
///
/// ```
/// use wage_engine::models::{PayPeriod, PublicHoliday};
/// use chrono::NaiveDate;
///
/// let pay_period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     public_holidays: vec![PublicHoliday {
///         date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///         name: "New Year's Day".to_string(),
///         branch: None,
///     }],
/// };
///
/// assert!(pay_period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()));
/// assert!(pay_period.is_public_holiday(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), "north"));
/// assert_eq!(pay_period.days().count(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// Public holidays that fall within this pay period.
    #[serde(default)]
    pub public_holidays: Vec<PublicHoliday>,
}

impl PayPeriod {
    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if a given date is a public holiday for the given branch.
    pub fn is_public_holiday(&self, date: NaiveDate, branch: &str) -> bool {
        self.public_holidays
            .iter()
            .any(|holiday| holiday.applies_to(date, branch))
    }

    /// Iterates over every date in the period, start to end.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_pay_period_with_holidays() -> PayPeriod {
        PayPeriod {
            start_date: make_date(2026, 12, 20),
            end_date: make_date(2027, 1, 3),
            public_holidays: vec![
                PublicHoliday {
                    date: make_date(2026, 12, 25),
                    name: "Christmas Day".to_string(),
                    branch: None,
                },
                PublicHoliday {
                    date: make_date(2026, 12, 28),
                    name: "Founders Day".to_string(),
                    branch: Some("north".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_contains_date_bounds_are_inclusive() {
        let period = create_pay_period_with_holidays();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
        assert!(period.contains_date(make_date(2026, 12, 31)));
        assert!(!period.contains_date(make_date(2026, 12, 19)));
        assert!(!period.contains_date(make_date(2027, 1, 4)));
    }

    #[test]
    fn test_company_wide_holiday_applies_to_every_branch() {
        let period = create_pay_period_with_holidays();
        assert!(period.is_public_holiday(make_date(2026, 12, 25), "north"));
        assert!(period.is_public_holiday(make_date(2026, 12, 25), "south"));
        assert!(!period.is_public_holiday(make_date(2026, 12, 24), "north"));
    }

    #[test]
    fn test_branch_holiday_only_applies_to_its_branch() {
        let period = create_pay_period_with_holidays();
        assert!(period.is_public_holiday(make_date(2026, 12, 28), "north"));
        assert!(period.is_public_holiday(make_date(2026, 12, 28), "NORTH"));
        assert!(!period.is_public_holiday(make_date(2026, 12, 28), "south"));
    }

    #[test]
    fn test_days_spans_year_boundary() {
        let period = create_pay_period_with_holidays();
        let days: Vec<NaiveDate> = period.days().collect();
        assert_eq!(days.len(), 15);
        assert_eq!(days[0], make_date(2026, 12, 20));
        assert_eq!(days[14], make_date(2027, 1, 3));
    }

    #[test]
    fn test_days_is_empty_for_inverted_period() {
        let period = PayPeriod {
            start_date: make_date(2026, 1, 10),
            end_date: make_date(2026, 1, 1),
            public_holidays: vec![],
        };
        assert_eq!(period.days().count(), 0);
    }

    #[test]
    fn test_deserialize_holiday_without_branch() {
        let json = r#"{
            "start_date": "2026-01-01",
            "end_date": "2026-01-15",
            "public_holidays": [
                { "date": "2026-01-01", "name": "New Year's Day" }
            ]
        }"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.public_holidays.len(), 1);
        assert_eq!(period.public_holidays[0].branch, None);
    }
}
