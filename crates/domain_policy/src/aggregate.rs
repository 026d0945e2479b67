//! Policy aggregate
//!
//! A `Policy` is one continuous coverage period for one insured object. It
//! owns the risks it covers together with the date each risk became
//! effective, and derives its premium from them on every read.
//!
//! # Invariants
//!
//! - `valid_from < valid_till`
//! - The premium always reflects the current risk set
//!
//! A policy does not check catalog membership, date bounds, or duplicates
//! when risks are added. `InsuranceCompany` does that before delegating.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{PolicyId, PolicyPeriod};

use crate::error::PolicyError;
use crate::premium::{prorated_total, MonthCounting};
use crate::risk::Risk;

/// A risk covered by a policy, with the date its coverage started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuredRisk {
    pub risk: Risk,
    pub effective_from: DateTime<Utc>,
}

/// The Policy aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    id: PolicyId,
    /// Name of the insured object, unique per overlapping period
    name_of_insured_object: String,
    /// Coverage window
    period: PolicyPeriod,
    /// Covered risks in insertion order
    insured_risks: Vec<InsuredRisk>,
    /// Month counting used for proration
    month_counting: MonthCounting,
}

impl Policy {
    /// Creates a policy with every risk effective from `valid_from`
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Temporal` if `valid_till` is not after `valid_from`
    pub fn new(
        name_of_insured_object: impl Into<String>,
        valid_from: DateTime<Utc>,
        valid_till: DateTime<Utc>,
        initial_risks: impl IntoIterator<Item = Risk>,
    ) -> Result<Self, PolicyError> {
        let period = PolicyPeriod::new(valid_from, valid_till)?;
        let insured_risks = initial_risks
            .into_iter()
            .map(|risk| InsuredRisk {
                risk,
                effective_from: valid_from,
            })
            .collect();

        Ok(Self {
            id: PolicyId::new(),
            name_of_insured_object: name_of_insured_object.into(),
            period,
            insured_risks,
            month_counting: MonthCounting::default(),
        })
    }

    /// Sets the month counting used for proration
    pub fn with_month_counting(mut self, month_counting: MonthCounting) -> Self {
        self.month_counting = month_counting;
        self
    }

    /// Returns the policy ID
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// Returns the name of the insured object
    pub fn name_of_insured_object(&self) -> &str {
        &self.name_of_insured_object
    }

    /// Date when the policy becomes active
    pub fn valid_from(&self) -> DateTime<Utc> {
        self.period.start
    }

    /// Date when the policy becomes inactive
    pub fn valid_till(&self) -> DateTime<Utc> {
        self.period.end
    }

    /// Returns the coverage window
    pub fn period(&self) -> &PolicyPeriod {
        &self.period
    }

    /// Returns the month counting used for proration
    pub fn month_counting(&self) -> MonthCounting {
        self.month_counting
    }

    /// Currently covered risks
    pub fn insured_risks(&self) -> impl Iterator<Item = &Risk> + '_ {
        self.insured_risks.iter().map(|insured| &insured.risk)
    }

    /// Currently covered risks with their effective dates
    pub fn coverage(&self) -> &[InsuredRisk] {
        &self.insured_risks
    }

    /// Risks whose coverage had started by `date`
    pub fn insured_risks_at(&self, date: DateTime<Utc>) -> Vec<&Risk> {
        self.insured_risks
            .iter()
            .filter(|insured| insured.effective_from <= date)
            .map(|insured| &insured.risk)
            .collect()
    }

    /// Returns true if the policy ended before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.period.is_expired_at(now)
    }

    /// Total price of the policy
    ///
    /// Each risk contributes its yearly price prorated over the whole months
    /// from its effective date to `valid_till`.
    ///
    /// Saturates at `Decimal::MAX` when the total is out of range. Policies
    /// sold or amended through `InsuranceCompany` never reach it; use
    /// [`Policy::try_premium`] to detect it.
    pub fn premium(&self) -> Decimal {
        self.try_premium().unwrap_or(Decimal::MAX)
    }

    /// Total price of the policy, failing if it is out of the `Decimal` range
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::PremiumOverflow`
    pub fn try_premium(&self) -> Result<Decimal, PolicyError> {
        prorated_total(self.insured_risks.iter().map(|insured| {
            let months = self
                .month_counting
                .months_between(self.period.end, insured.effective_from);
            (insured.risk.yearly_price(), months)
        }))
        .ok_or_else(|| PolicyError::PremiumOverflow {
            name: self.name_of_insured_object.clone(),
        })
    }

    /// Adds a risk whose coverage starts at `effective_from`
    pub fn add_risk(&mut self, risk: Risk, effective_from: DateTime<Utc>) {
        self.insured_risks.push(InsuredRisk {
            risk,
            effective_from,
        });
    }

    /// Removes the first risk with the given name
    ///
    /// Returns false and leaves the policy untouched if no risk matches.
    pub fn remove_risk(&mut self, name: &str) -> bool {
        match self
            .insured_risks
            .iter()
            .position(|insured| insured.risk.name() == name)
        {
            Some(index) => {
                self.insured_risks.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn home_policy() -> Policy {
        Policy::new(
            "18 tree st.",
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap(),
            vec![
                Risk::new("Theft", dec!(200)),
                Risk::new("Flood", dec!(300)),
                Risk::new("Aliens", dec!(1200)),
                Risk::new("Ants", dec!(100)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_policy_creation() {
        let policy = home_policy();
        assert_eq!(policy.name_of_insured_object(), "18 tree st.");
        assert_eq!(policy.insured_risks().count(), 4);
        assert_eq!(policy.premium(), dec!(900));
    }

    #[test]
    fn test_initial_risks_effective_from_start() {
        let policy = home_policy();
        assert!(policy
            .coverage()
            .iter()
            .all(|insured| insured.effective_from == policy.valid_from()));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let result = Policy::new("Car", start, start, Vec::new());
        assert!(matches!(result, Err(PolicyError::Temporal(_))));
    }

    #[test]
    fn test_remove_risk_recomputes_premium() {
        let mut policy = home_policy();
        assert!(policy.remove_risk("Aliens"));
        assert_eq!(policy.insured_risks().count(), 3);
        assert_eq!(policy.premium(), dec!(300));
    }

    #[test]
    fn test_out_of_range_premium() {
        let mut policy = home_policy();
        policy.add_risk(Risk::new("Meteor", Decimal::MAX), policy.valid_from());

        assert_eq!(
            policy.try_premium(),
            Err(PolicyError::PremiumOverflow {
                name: "18 tree st.".into()
            })
        );
        assert_eq!(policy.premium(), Decimal::MAX);
    }
}
