//! Test Data Builders
//!
//! Provides a builder for policy sale requests so tests only spell out the
//! field they care about.

use chrono::{DateTime, Utc};
use domain_policy::{InsuranceCompany, Policy, PolicyError, Risk};

use crate::fixtures::{CatalogFixtures, CompanyFixtures, TemporalFixtures};

/// Builder for a `sell_policy` call
#[derive(Debug, Clone)]
pub struct SaleRequestBuilder {
    name_of_insured_object: String,
    valid_from: DateTime<Utc>,
    valid_months: u32,
    risks: Vec<Risk>,
}

impl Default for SaleRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SaleRequestBuilder {
    /// Creates the standard home policy request
    pub fn new() -> Self {
        Self {
            name_of_insured_object: CompanyFixtures::HOME.to_string(),
            valid_from: TemporalFixtures::policy_start(),
            valid_months: 8,
            risks: CatalogFixtures::home_risks(),
        }
    }

    /// Sets the insured object name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name_of_insured_object = name.into();
        self
    }

    /// Sets the start date
    pub fn starting(mut self, valid_from: DateTime<Utc>) -> Self {
        self.valid_from = valid_from;
        self
    }

    /// Sets the period length
    pub fn for_months(mut self, valid_months: u32) -> Self {
        self.valid_months = valid_months;
        self
    }

    /// Replaces the selected risks
    pub fn with_risks(mut self, risks: Vec<Risk>) -> Self {
        self.risks = risks;
        self
    }

    /// Adds a selected risk
    pub fn add_risk(mut self, risk: Risk) -> Self {
        self.risks.push(risk);
        self
    }

    /// Submits the request to the company
    pub fn sell<'a>(self, company: &'a mut InsuranceCompany) -> Result<&'a Policy, PolicyError> {
        company.sell_policy(
            &self.name_of_insured_object,
            self.valid_from,
            self.valid_months,
            self.risks,
        )
    }
}
