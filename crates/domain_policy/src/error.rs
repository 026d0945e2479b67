//! Policy domain errors
//!
//! Every failure a caller can trigger through the company or a policy is a
//! variant here. Variants carry the offending values so callers can build
//! their own messages; `Display` renders the fixed English text.

use chrono::{DateTime, Utc};
use thiserror::Error;

use core_kernel::TemporalError;

/// Errors that can occur in the policy domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Sale requested with a start date before the current time
    #[error("Policy starting date can not be in past!")]
    InvalidPolicyStartingTime {
        valid_from: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// A policy for the same insured object already covers part of the period
    #[error("Policy with the same name can't overlap period!")]
    PolicyPeriodOverlap {
        name: String,
        existing_from: DateTime<Utc>,
        existing_till: DateTime<Utc>,
    },

    /// Sale includes risks missing from the catalog
    #[error("One or more risks are not available!")]
    RiskNotAvailable {
        /// Names of the rejected risks, in request order
        missing: Vec<String>,
    },

    /// Amendment targets an insured object with no policy
    #[error("Insurance \"{name}\" do not exist!")]
    PolicyNotFound { name: String },

    /// Amendment risk is missing from the catalog
    #[error("{risk_name} is not available!")]
    RiskDoesNotExist { risk_name: String },

    /// Amendment date falls after the policy end
    #[error("Policy expired at {valid_till}")]
    PolicyExpired { valid_till: DateTime<Utc> },

    /// Lookup of an insured object with no policy
    #[error("There is no policy with name \"{name}\"!")]
    InsuredObjectDoesNotExist { name: String },

    /// Lookup date is outside every policy period for the insured object
    #[error("There is no valid Policy at this time!")]
    InvalidPolicy {
        name: String,
        effective_date: DateTime<Utc>,
    },

    /// Sale lists the same risk more than once
    #[error("{risk_name} is selected more than once!")]
    DuplicateRisk { risk_name: String },

    /// Premium does not fit in the decimal range
    #[error("Premium of \"{name}\" is out of range!")]
    PremiumOverflow { name: String },

    /// Period construction failed
    #[error(transparent)]
    Temporal(#[from] TemporalError),
}

impl PolicyError {
    /// Creates a policy not found error
    pub fn policy_not_found(name: impl Into<String>) -> Self {
        PolicyError::PolicyNotFound { name: name.into() }
    }

    /// Creates an unknown insured object error
    pub fn insured_object_not_found(name: impl Into<String>) -> Self {
        PolicyError::InsuredObjectDoesNotExist { name: name.into() }
    }
}
