//! Premium proration
//!
//! Risk prices are quoted per full year. A risk covered for part of a year
//! contributes `yearly_price / 12 * months`, where `months` is a whole-month
//! count from the risk's effective date to the policy end.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{elapsed_months, month_of_year_diff};

const MONTHS_PER_YEAR: u32 = 12;

/// How whole months between two dates are counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthCounting {
    /// True elapsed months, `(y2 - y1) * 12 + (m2 - m1)`
    #[default]
    Elapsed,
    /// Month-of-year subtraction that ignores the year
    ///
    /// Periods crossing a year boundary produce zero or negative counts.
    CalendarNaive,
}

impl MonthCounting {
    /// Whole months from `from` to `to`
    pub fn months_between(self, to: DateTime<Utc>, from: DateTime<Utc>) -> i64 {
        match self {
            MonthCounting::Elapsed => elapsed_months(to, from),
            MonthCounting::CalendarNaive => month_of_year_diff(to, from),
        }
    }
}

/// Total premium for a set of `(yearly_price, months)` contributions
///
/// Divides once at the end so sums of thirds and sixths stay exact. Returns
/// `None` if an intermediate value leaves the `Decimal` range.
pub fn prorated_total<I>(contributions: I) -> Option<Decimal>
where
    I: IntoIterator<Item = (Decimal, i64)>,
{
    contributions
        .into_iter()
        .try_fold(Decimal::ZERO, |total, (yearly_price, months)| {
            yearly_price.checked_mul(Decimal::from(months))?.checked_add(total)
        })?
        .checked_div(Decimal::from(MONTHS_PER_YEAR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prorated_total_of_nothing_is_zero() {
        assert_eq!(
            prorated_total(std::iter::empty::<(Decimal, i64)>()),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_prorated_total_stays_exact() {
        let total = prorated_total([(dec!(100), 8), (dec!(200), 8), (dec!(1200), 8)]);
        assert_eq!(total, Some(dec!(1000)));
    }

    #[test]
    fn test_prorated_total_out_of_range() {
        assert_eq!(prorated_total([(Decimal::MAX, 8)]), None);
        assert_eq!(prorated_total([(Decimal::MAX, 1), (Decimal::MAX, 1)]), None);
    }

    #[test]
    fn test_counting_modes_differ_across_year() {
        let from = Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(MonthCounting::Elapsed.months_between(to, from), 3);
        assert_eq!(MonthCounting::CalendarNaive.months_between(to, from), -9);
    }
}
