//! Pre-built Test Fixtures
//!
//! Provides ready-to-use catalogs, dates, and companies. Everything is
//! pinned to a fixed clock so sale-date checks are predictable.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::FixedClock;
use domain_policy::{InsuranceCompany, Risk};
use rust_decimal_macros::dec;

/// Fixture for risk catalogs
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn theft() -> Risk {
        Risk::new("Theft", dec!(200))
    }

    pub fn flood() -> Risk {
        Risk::new("Flood", dec!(300))
    }

    pub fn aliens() -> Risk {
        Risk::new("Aliens", dec!(1200))
    }

    pub fn ants() -> Risk {
        Risk::new("Ants", dec!(100))
    }

    pub fn zombie() -> Risk {
        Risk::new("Zombie", dec!(200))
    }

    /// A risk that no fixture catalog contains
    pub fn swamp_monster() -> Risk {
        Risk::new("Swamp monster", dec!(9999))
    }

    /// The five-risk catalog of "Mega Safe Insurance"
    pub fn mega_safe_catalog() -> Vec<Risk> {
        vec![
            Self::theft(),
            Self::flood(),
            Self::aliens(),
            Self::ants(),
            Self::zombie(),
        ]
    }

    /// Risks sold on the standard home policy, worth 1500 a year
    pub fn home_risks() -> Vec<Risk> {
        vec![Self::aliens(), Self::ants(), Self::zombie()]
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Midnight UTC on the given date
    pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    /// Time the fixture clock starts at (Jan 1, 2024)
    pub fn now() -> DateTime<Utc> {
        Self::at(2024, 1, 1)
    }

    /// Standard policy start date (Feb 1, 2024)
    pub fn policy_start() -> DateTime<Utc> {
        Self::at(2024, 2, 1)
    }

    /// End of an 8 month policy from `policy_start` (Oct 1, 2024)
    pub fn policy_end() -> DateTime<Utc> {
        Self::at(2024, 10, 1)
    }
}

/// Fixture for companies
pub struct CompanyFixtures;

impl CompanyFixtures {
    pub const NAME: &'static str = "Mega Safe Insurance";
    pub const HOME: &'static str = "Home insurance";

    /// Company fixture with the Mega Safe catalog and its clock
    pub fn mega_safe() -> (InsuranceCompany, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(TemporalFixtures::now()));
        let company = InsuranceCompany::new(
            Self::NAME,
            CatalogFixtures::mega_safe_catalog(),
            clock.clone(),
        );
        (company, clock)
    }

    /// Mega Safe with the standard 8 month home policy already sold
    pub fn with_home_policy() -> (InsuranceCompany, Arc<FixedClock>) {
        let (mut company, clock) = Self::mega_safe();
        company
            .sell_policy(
                Self::HOME,
                TemporalFixtures::policy_start(),
                8,
                CatalogFixtures::home_risks(),
            )
            .unwrap();
        (company, clock)
    }
}
