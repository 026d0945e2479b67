//! Insurable risks
//!
//! A `Risk` is a named peril with a flat yearly price. Two risks are the same
//! only when both name and price match, which is the rule catalog membership
//! checks rely on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An insurable peril priced per full year
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Risk {
    name: String,
    yearly_price: Decimal,
}

impl Risk {
    pub fn new(name: impl Into<String>, yearly_price: Decimal) -> Self {
        Self {
            name: name.into(),
            yearly_price,
        }
    }

    /// Unique name of the risk
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price for one full year of coverage
    pub fn yearly_price(&self) -> Decimal {
        self.yearly_price
    }
}
