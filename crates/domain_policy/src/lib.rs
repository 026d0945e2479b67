//! Policy Lifecycle Domain
//!
//! This crate implements the sale and amendment of time-bounded insurance
//! policies covering a catalog of flat-priced risks.
//!
//! # Architecture
//!
//! - **Value Objects**: `Risk`
//! - **Aggregates**: `Policy` owns its covered risks and derives its premium;
//!   `InsuranceCompany` is the root that owns the catalog and all sold policies
//! - **Domain Events**: `CompanyEvent`
//!
//! # Policy Lifecycle
//!
//! ```text
//! (none) -> Active -> [risk added]* -> Expired
//! ```
//!
//! Expiry is not a stored state. A policy is expired once the clock is past
//! its `valid_till`.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{InsuranceCompany, Risk};
//!
//! let mut company = InsuranceCompany::new("Mega Safe Insurance", catalog, clock);
//! company.sell_policy("Home insurance", start, 8, selected)?;
//! company.add_risk("Home insurance", theft, start + Months::new(2))?;
//! let policy = company.get_policy("Home insurance", start)?;
//! ```

pub mod aggregate;
pub mod company;
pub mod config;
pub mod error;
pub mod events;
pub mod premium;
pub mod risk;

pub use aggregate::{InsuredRisk, Policy};
pub use company::{CompanySnapshot, InsuranceCompany};
pub use config::{CompanyConfig, RiskConfig};
pub use error::PolicyError;
pub use events::CompanyEvent;
pub use premium::MonthCounting;
pub use risk::Risk;
