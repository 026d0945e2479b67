//! Property-Based Test Generators
//!
//! Provides proptest strategies for risks, dates, and sale requests.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_policy::Risk;

use crate::fixtures::CatalogFixtures;

/// Strategy for whole-unit yearly prices between 1 and 100 000
pub fn yearly_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(Decimal::from)
}

/// Strategy for arbitrary risks
pub fn risk_strategy() -> impl Strategy<Value = Risk> {
    ("[A-Z][a-z]{2,10}", yearly_price_strategy())
        .prop_map(|(name, price)| Risk::new(name, price))
}

/// Strategy for non-empty subsets of the Mega Safe catalog
pub fn catalog_subset_strategy() -> impl Strategy<Value = Vec<Risk>> {
    proptest::sample::subsequence(CatalogFixtures::mega_safe_catalog(), 1..=5)
}

/// Strategy for a month-start date from 2024 through 2030
pub fn future_month_start_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (2024i32..=2030, 1u32..=12)
        .prop_map(|(year, month)| Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap())
}

/// Strategy for policy lengths between 1 and 24 months
pub fn valid_months_strategy() -> impl Strategy<Value = u32> {
    1u32..=24
}
