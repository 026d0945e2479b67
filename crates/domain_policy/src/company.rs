//! Insurance company aggregate root
//!
//! The company owns the sellable risk catalog and every policy it has sold.
//! All changes to sold policies go through it so sale-time and
//! amendment-time rules hold:
//!
//! - A sale cannot start in the past
//! - Policies for the same insured object never overlap
//! - Only catalog risks can be sold or added
//! - Risks cannot be added after a policy has expired
//!
//! Every operation validates fully before it mutates anything, so a rejected
//! call leaves the company unchanged.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use core_kernel::{Clock, PolicyPeriod};

use crate::aggregate::Policy;
use crate::config::CompanyConfig;
use crate::error::PolicyError;
use crate::events::CompanyEvent;
use crate::premium::MonthCounting;
use crate::risk::Risk;

/// Serializable state of an insurance company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    pub name: String,
    pub month_counting: MonthCounting,
    pub available_risks: Vec<Risk>,
    pub policies: Vec<Policy>,
}

/// The insurance company aggregate root
pub struct InsuranceCompany {
    /// Name of the company
    name: String,
    /// Risks that can currently be sold
    available_risks: HashSet<Risk>,
    /// Every policy ever sold, in sale order
    policies: Vec<Policy>,
    /// Month counting applied to newly sold policies
    month_counting: MonthCounting,
    clock: Arc<dyn Clock>,
    events: Vec<CompanyEvent>,
}

impl InsuranceCompany {
    /// Creates a company with the given catalog and no sold policies
    pub fn new(
        name: impl Into<String>,
        available_risks: impl IntoIterator<Item = Risk>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            available_risks: available_risks.into_iter().collect(),
            policies: Vec::new(),
            month_counting: MonthCounting::default(),
            clock,
            events: Vec::new(),
        }
    }

    /// Creates a company from configuration
    pub fn from_config(config: &CompanyConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(config.name.clone(), config.catalog(), clock)
            .with_month_counting(config.month_counting)
    }

    /// Restores a company from a snapshot
    pub fn from_snapshot(snapshot: CompanySnapshot, clock: Arc<dyn Clock>) -> Self {
        Self {
            name: snapshot.name,
            available_risks: snapshot.available_risks.into_iter().collect(),
            policies: snapshot.policies,
            month_counting: snapshot.month_counting,
            clock,
            events: Vec::new(),
        }
    }

    /// Sets the month counting used by policies sold from now on
    pub fn with_month_counting(mut self, month_counting: MonthCounting) -> Self {
        self.month_counting = month_counting;
        self
    }

    /// Name of the insurance company
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Risks that can currently be insured
    pub fn available_risks(&self) -> impl Iterator<Item = &Risk> + '_ {
        self.available_risks.iter()
    }

    /// Returns true if the exact risk (name and price) is in the catalog
    pub fn is_available(&self, risk: &Risk) -> bool {
        self.available_risks.contains(risk)
    }

    /// Replaces the catalog
    ///
    /// Risks already sold stay on their policies even if they are no longer
    /// in the catalog.
    pub fn set_available_risks(&mut self, risks: impl IntoIterator<Item = Risk>) {
        self.available_risks = risks.into_iter().collect();
        let risk_count = self.available_risks.len();
        info!(company = %self.name, risk_count, "Risk catalog replaced");
        self.events.push(CompanyEvent::CatalogReplaced {
            risk_count,
            timestamp: self.clock.now(),
        });
    }

    /// Every sold policy, in sale order
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Sold policies for one insured object, in sale order
    pub fn policies_for<'a>(
        &'a self,
        name_of_insured_object: &'a str,
    ) -> impl Iterator<Item = &'a Policy> + 'a {
        self.policies
            .iter()
            .filter(move |policy| policy.name_of_insured_object() == name_of_insured_object)
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<CompanyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Captures the company state for persistence
    pub fn snapshot(&self) -> CompanySnapshot {
        let mut available_risks: Vec<Risk> = self.available_risks.iter().cloned().collect();
        available_risks.sort();
        CompanySnapshot {
            name: self.name.clone(),
            month_counting: self.month_counting,
            available_risks,
            policies: self.policies.clone(),
        }
    }

    /// Sells a policy
    ///
    /// # Arguments
    ///
    /// * `name_of_insured_object` - Must not have another policy overlapping the period
    /// * `valid_from` - Start of coverage, not in the past
    /// * `valid_months` - Policy period in calendar months
    /// * `selected_risks` - Risks to include, all of them from the catalog and
    ///   each at most once
    ///
    /// # Errors
    ///
    /// Checks run in order and the first failure is returned:
    /// `InvalidPolicyStartingTime`, `PolicyPeriodOverlap`, `RiskNotAvailable`,
    /// `DuplicateRisk`, `PremiumOverflow`.
    #[instrument(skip(self, selected_risks), fields(company = %self.name))]
    pub fn sell_policy(
        &mut self,
        name_of_insured_object: &str,
        valid_from: DateTime<Utc>,
        valid_months: u32,
        selected_risks: impl IntoIterator<Item = Risk>,
    ) -> Result<&Policy, PolicyError> {
        let selected_risks: Vec<Risk> = selected_risks.into_iter().collect();
        self.try_sell_policy(name_of_insured_object, valid_from, valid_months, selected_risks)
            .inspect_err(|error| warn!(%error, "Policy sale rejected"))
    }

    fn try_sell_policy(
        &mut self,
        name_of_insured_object: &str,
        valid_from: DateTime<Utc>,
        valid_months: u32,
        selected_risks: Vec<Risk>,
    ) -> Result<&Policy, PolicyError> {
        let now = self.clock.now();
        if valid_from < now {
            return Err(PolicyError::InvalidPolicyStartingTime { valid_from, now });
        }

        let period = PolicyPeriod::for_months(valid_from, valid_months)?;

        if let Some(existing) = self
            .policies_for(name_of_insured_object)
            .find(|policy| policy.period().overlaps(&period))
        {
            return Err(PolicyError::PolicyPeriodOverlap {
                name: name_of_insured_object.to_string(),
                existing_from: existing.valid_from(),
                existing_till: existing.valid_till(),
            });
        }

        let missing: Vec<String> = selected_risks
            .iter()
            .filter(|risk| !self.available_risks.contains(*risk))
            .map(|risk| risk.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PolicyError::RiskNotAvailable { missing });
        }

        let duplicate = {
            let mut seen = HashSet::with_capacity(selected_risks.len());
            selected_risks
                .iter()
                .find(|risk| !seen.insert(*risk))
                .map(|risk| risk.name().to_string())
        };
        if let Some(risk_name) = duplicate {
            return Err(PolicyError::DuplicateRisk { risk_name });
        }

        let policy = Policy::new(name_of_insured_object, period.start, period.end, selected_risks)?
            .with_month_counting(self.month_counting);
        let premium = policy.try_premium()?;

        info!(
            policy_id = %policy.id(),
            valid_till = %policy.valid_till(),
            %premium,
            "Policy sold"
        );
        self.events.push(CompanyEvent::PolicySold {
            policy_id: policy.id(),
            name_of_insured_object: name_of_insured_object.to_string(),
            valid_from: policy.valid_from(),
            valid_till: policy.valid_till(),
            premium,
            timestamp: now,
        });

        let index = self.policies.len();
        self.policies.push(policy);
        Ok(&self.policies[index])
    }

    /// Adds a risk to the policy of an insured object
    ///
    /// The target is the policy [`get_policy`](Self::get_policy) returns for
    /// `valid_from`, so at the boundary between back-to-back policies the
    /// later one is amended. If no policy covers `valid_from`, the risk goes
    /// to the next policy to start after it, and the effective date is moved
    /// to that policy's start.
    ///
    /// # Errors
    ///
    /// Checks run in order and the first failure is returned:
    /// `RiskDoesNotExist`, `PolicyNotFound`, `PolicyExpired`, `PremiumOverflow`.
    #[instrument(skip(self, risk), fields(company = %self.name, risk = %risk.name()))]
    pub fn add_risk(
        &mut self,
        name_of_insured_object: &str,
        risk: Risk,
        valid_from: DateTime<Utc>,
    ) -> Result<(), PolicyError> {
        self.try_add_risk(name_of_insured_object, risk, valid_from)
            .inspect_err(|error| warn!(%error, "Risk amendment rejected"))
    }

    fn try_add_risk(
        &mut self,
        name_of_insured_object: &str,
        risk: Risk,
        valid_from: DateTime<Utc>,
    ) -> Result<(), PolicyError> {
        if !self.available_risks.contains(&risk) {
            return Err(PolicyError::RiskDoesNotExist {
                risk_name: risk.name().to_string(),
            });
        }

        let candidates: Vec<(usize, &Policy)> = self
            .policies
            .iter()
            .enumerate()
            .filter(|(_, policy)| policy.name_of_insured_object() == name_of_insured_object)
            .collect();
        let latest_till = candidates.iter().map(|(_, policy)| policy.valid_till()).max();
        let Some(latest_till) = latest_till else {
            return Err(PolicyError::policy_not_found(name_of_insured_object));
        };

        let covering = candidates
            .iter()
            .filter(|(_, policy)| policy.period().contains(valid_from))
            .max_by_key(|(_, policy)| policy.valid_from());
        let upcoming = || {
            candidates
                .iter()
                .filter(|(_, policy)| valid_from < policy.valid_from())
                .min_by_key(|(_, policy)| policy.valid_from())
        };
        let Some(&(index, _)) = covering.or_else(upcoming) else {
            return Err(PolicyError::PolicyExpired { valid_till: latest_till });
        };

        let mut amended = self.policies[index].clone();
        let effective_from = valid_from.max(amended.valid_from());
        if effective_from != valid_from {
            debug!(%valid_from, %effective_from, "Risk effective date moved to policy start");
        }

        let risk_name = risk.name().to_string();
        amended.add_risk(risk, effective_from);
        let premium = amended.try_premium()?;
        let policy_id = amended.id();
        self.policies[index] = amended;

        let now = self.clock.now();
        info!(policy_id = %policy_id, %effective_from, %premium, "Risk added to policy");
        self.events.push(CompanyEvent::RiskAdded {
            policy_id,
            risk_name,
            effective_from,
            premium,
            timestamp: now,
        });
        Ok(())
    }

    /// Gets the policy of an insured object effective at the given time
    ///
    /// Both ends of a policy period count as effective. At the boundary
    /// between back-to-back policies the later one is returned.
    ///
    /// # Errors
    ///
    /// `InsuredObjectDoesNotExist` if nothing was ever sold for the name,
    /// `InvalidPolicy` if no period contains `effective_date`.
    #[instrument(skip(self), fields(company = %self.name))]
    pub fn get_policy(
        &self,
        name_of_insured_object: &str,
        effective_date: DateTime<Utc>,
    ) -> Result<&Policy, PolicyError> {
        let mut candidates = self
            .policies
            .iter()
            .filter(|policy| policy.name_of_insured_object() == name_of_insured_object)
            .peekable();
        if candidates.peek().is_none() {
            debug!("No policies sold for insured object");
            return Err(PolicyError::insured_object_not_found(name_of_insured_object));
        }

        candidates
            .filter(|policy| policy.period().contains(effective_date))
            .max_by_key(|policy| policy.valid_from())
            .ok_or_else(|| PolicyError::InvalidPolicy {
                name: name_of_insured_object.to_string(),
                effective_date,
            })
    }
}

impl fmt::Debug for InsuranceCompany {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsuranceCompany")
            .field("name", &self.name)
            .field("available_risks", &self.available_risks)
            .field("policies", &self.policies)
            .field("month_counting", &self.month_counting)
            .finish_non_exhaustive()
    }
}
