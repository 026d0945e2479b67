//! Domain events for the insurance company aggregate
//!
//! Events record each committed change to the catalog or to the sold
//! policies. Rejected operations emit nothing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;

/// Domain events emitted by `InsuranceCompany`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyEvent {
    /// A new policy has been sold
    PolicySold {
        policy_id: PolicyId,
        name_of_insured_object: String,
        valid_from: DateTime<Utc>,
        valid_till: DateTime<Utc>,
        premium: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// A risk has been added to a sold policy
    RiskAdded {
        policy_id: PolicyId,
        risk_name: String,
        effective_from: DateTime<Utc>,
        premium: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// The sellable catalog has been replaced
    CatalogReplaced {
        risk_count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl CompanyEvent {
    /// Returns the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            CompanyEvent::PolicySold { timestamp, .. }
            | CompanyEvent::RiskAdded { timestamp, .. }
            | CompanyEvent::CatalogReplaced { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the affected policy, if any
    pub fn policy_id(&self) -> Option<PolicyId> {
        match self {
            CompanyEvent::PolicySold { policy_id, .. }
            | CompanyEvent::RiskAdded { policy_id, .. } => Some(*policy_id),
            CompanyEvent::CatalogReplaced { .. } => None,
        }
    }
}
