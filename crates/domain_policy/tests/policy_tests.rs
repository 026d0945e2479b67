//! Policy Aggregate Tests
//!
//! Exercises `Policy` on its own, without the company's validation, using
//! the "18 tree st." fixture: four risks worth 1800 a year over six months.

use chrono::{DateTime, Utc};
use domain_policy::{MonthCounting, Policy, PolicyError, Risk};
use rust_decimal_macros::dec;
use test_utils::{assert_covers, assert_premium, CatalogFixtures, TemporalFixtures};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    TemporalFixtures::at(y, m, d)
}

fn tree_street_risks() -> Vec<Risk> {
    vec![
        CatalogFixtures::theft(),
        CatalogFixtures::flood(),
        CatalogFixtures::aliens(),
        CatalogFixtures::ants(),
    ]
}

fn tree_street_policy() -> Policy {
    Policy::new("18 tree st.", at(2024, 2, 1), at(2024, 8, 1), tree_street_risks())
        .expect("Test policy creation should succeed")
}

mod creation {
    use super::*;

    #[test]
    fn test_name_and_risks() {
        let policy = tree_street_policy();
        assert_eq!(policy.name_of_insured_object(), "18 tree st.");
        assert_eq!(policy.insured_risks().cloned().collect::<Vec<_>>(), tree_street_risks());
    }

    #[test]
    fn test_valid_till() {
        let policy = tree_street_policy();
        assert_eq!(policy.valid_from(), at(2024, 2, 1));
        assert_eq!(policy.valid_till(), at(2024, 8, 1));
    }

    #[test]
    fn test_premium_is_half_the_yearly_total() {
        let policy = tree_street_policy();
        let yearly: rust_decimal::Decimal =
            tree_street_risks().iter().map(Risk::yearly_price).sum();
        assert_premium(&policy, yearly / dec!(2));
        assert_premium(&policy, dec!(900));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let result =
            Policy::new("18 tree st.", at(2024, 8, 1), at(2024, 2, 1), tree_street_risks());
        assert!(matches!(result, Err(PolicyError::Temporal(_))));
    }

    #[test]
    fn test_default_month_counting_is_elapsed() {
        assert_eq!(tree_street_policy().month_counting(), MonthCounting::Elapsed);
    }
}

mod amending {
    use super::*;

    #[test]
    fn test_add_risk_from_start_counts_full_term() {
        let mut policy = tree_street_policy();
        policy.add_risk(CatalogFixtures::zombie(), policy.valid_from());
        assert_premium(&policy, dec!(1000));
    }

    #[test]
    fn test_add_risk_mid_term_counts_remaining_months() {
        let mut policy = tree_street_policy();
        policy.add_risk(CatalogFixtures::zombie(), at(2024, 5, 1));
        // 900 + 200 / 12 * 3
        assert_premium(&policy, dec!(950));
    }

    #[test]
    fn test_add_risk_allows_duplicates() {
        let mut policy = tree_street_policy();
        policy.add_risk(CatalogFixtures::theft(), policy.valid_from());
        assert_eq!(policy.insured_risks().count(), 5);
        assert_premium(&policy, dec!(1000));
    }

    #[test]
    fn test_remove_risk() {
        let mut policy = tree_street_policy();
        assert!(policy.remove_risk("Aliens"));
        assert_covers(&policy, &["Theft", "Flood", "Ants"]);
        assert_premium(&policy, dec!(300));
    }

    #[test]
    fn test_remove_missing_risk_changes_nothing() {
        let mut policy = tree_street_policy();
        let before = policy.clone();
        assert!(!policy.remove_risk("Sharks"));
        assert_eq!(policy, before);
        assert_premium(&policy, dec!(900));
    }

    #[test]
    fn test_remove_risk_takes_first_match_only() {
        let mut policy = tree_street_policy();
        policy.add_risk(CatalogFixtures::theft(), at(2024, 6, 1));
        assert!(policy.remove_risk("Theft"));

        let theft: Vec<_> = policy
            .coverage()
            .iter()
            .filter(|insured| insured.risk.name() == "Theft")
            .collect();
        assert_eq!(theft.len(), 1);
        assert_eq!(theft[0].effective_from, at(2024, 6, 1));
    }

    #[test]
    fn test_premium_is_idempotent() {
        let mut policy = tree_street_policy();
        policy.add_risk(CatalogFixtures::zombie(), at(2024, 3, 1));
        let first = policy.premium();
        assert_eq!(policy.premium(), first);
        assert_eq!(policy.premium(), first);
    }
}

mod point_in_time {
    use super::*;

    #[test]
    fn test_risks_effective_at_date() {
        let mut policy = tree_street_policy();
        policy.add_risk(CatalogFixtures::zombie(), at(2024, 5, 1));

        assert_eq!(policy.insured_risks_at(at(2024, 4, 30)).len(), 4);
        let names: Vec<&str> = policy
            .insured_risks_at(at(2024, 5, 1))
            .into_iter()
            .map(Risk::name)
            .collect();
        assert!(names.contains(&"Zombie"));
    }

    #[test]
    fn test_nothing_effective_before_start() {
        let policy = tree_street_policy();
        assert!(policy.insured_risks_at(at(2024, 1, 31)).is_empty());
    }
}
