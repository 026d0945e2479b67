//! Custom Test Assertions
//!
//! Assertion helpers for policies that print the policy state on failure.

use domain_policy::Policy;
use rust_decimal::Decimal;

/// Asserts the premium of a policy
///
/// # Panics
///
/// Panics with the covered risks listed if the premium differs
pub fn assert_premium(policy: &Policy, expected: Decimal) {
    let actual = policy.premium();
    assert_eq!(
        actual,
        expected,
        "Premium mismatch for {:?}: actual={}, expected={}, coverage={:?}",
        policy.name_of_insured_object(),
        actual,
        expected,
        policy.coverage()
    );
}

/// Asserts the names of the covered risks, ignoring order
pub fn assert_covers(policy: &Policy, expected: &[&str]) {
    let mut actual: Vec<&str> = policy.insured_risks().map(|risk| risk.name()).collect();
    let mut expected = expected.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(
        actual,
        expected,
        "Covered risks mismatch for {:?}",
        policy.name_of_insured_object()
    );
}
