//! Calendar periods and month arithmetic
//!
//! Policies are sold for a whole number of calendar months and priced by
//! whole months, so this module keeps the month math in one place:
//! - `add_months`: calendar-month addition (day clamped to month end)
//! - `elapsed_months` / `month_of_year_diff`: whole-month differences
//! - `PolicyPeriod`: a bounded `[start, end]` coverage window

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must be before end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Adding {months} months to {start} is out of range")]
    OutOfRange {
        start: String,
        months: u32,
    },
}

/// Adds calendar months to a timestamp
///
/// The day of month is clamped to the last day of the target month, so
/// Jan 31 + 1 month is Feb 29 in a leap year.
pub fn add_months(start: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, TemporalError> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| TemporalError::OutOfRange {
            start: start.to_string(),
            months,
        })
}

/// Whole calendar months from `from` to `to`, ignoring the day of month
///
/// Negative when `to` lies in an earlier month than `from`.
pub fn elapsed_months(to: DateTime<Utc>, from: DateTime<Utc>) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    years * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// Difference between the month-of-year numbers of two timestamps
///
/// The year is ignored: Nov 2024 to Feb 2025 yields -9.
pub fn month_of_year_diff(to: DateTime<Utc>, from: DateTime<Utc>) -> i64 {
    i64::from(to.month()) - i64::from(from.month())
}

/// A bounded coverage window
///
/// `contains` treats both ends as inclusive while `overlaps` treats the end
/// as exclusive, so back-to-back periods never overlap but the boundary
/// instant still resolves to a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyPeriod {
    /// Start of coverage (inclusive)
    pub start: DateTime<Utc>,
    /// End of coverage
    pub end: DateTime<Utc>,
}

impl PolicyPeriod {
    /// Creates a period, rejecting empty or inverted ranges
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        if start >= end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a period lasting `months` calendar months from `start`
    pub fn for_months(start: DateTime<Utc>, months: u32) -> Result<Self, TemporalError> {
        Self::new(start, add_months(start, months)?)
    }

    /// Returns true if the timestamp falls within `[start, end]`
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Returns true if the half-open intervals `[start, end)` intersect
    pub fn overlaps(&self, other: &PolicyPeriod) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns true once `now` is past the end of the period
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.end
    }

    /// Elapsed whole months between start and end
    pub fn months(&self) -> i64 {
        elapsed_months(self.end, self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(at(2024, 1, 31), 1).unwrap(), at(2024, 2, 29));
        assert_eq!(add_months(at(2023, 1, 31), 1).unwrap(), at(2023, 2, 28));
    }

    #[test]
    fn test_add_months_crosses_year() {
        assert_eq!(add_months(at(2024, 11, 1), 3).unwrap(), at(2025, 2, 1));
    }

    #[test]
    fn test_month_differences_across_year_boundary() {
        let from = at(2024, 11, 1);
        let to = at(2025, 2, 1);
        assert_eq!(elapsed_months(to, from), 3);
        assert_eq!(month_of_year_diff(to, from), -9);
    }

    #[test]
    fn test_period_rejects_empty_range() {
        let start = at(2024, 2, 1);
        assert!(matches!(
            PolicyPeriod::new(start, start),
            Err(TemporalError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_back_to_back_periods_do_not_overlap() {
        let first = PolicyPeriod::for_months(at(2024, 2, 1), 4).unwrap();
        let second = PolicyPeriod::for_months(at(2024, 6, 1), 4).unwrap();
        assert!(!first.overlaps(&second));
        assert!(first.contains(at(2024, 6, 1)));
        assert!(second.contains(at(2024, 6, 1)));
    }
}
