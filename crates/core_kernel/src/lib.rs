//! Core Kernel - Foundational types for the policy lifecycle
//!
//! This crate provides the building blocks shared by the domain crates:
//! - Calendar periods and whole-month arithmetic
//! - A clock port so "now" can be injected
//! - Strongly-typed identifiers

pub mod clock;
pub mod identifiers;
pub mod temporal;

pub use clock::{Clock, FixedClock, SystemClock};
pub use identifiers::PolicyId;
pub use temporal::{add_months, elapsed_months, month_of_year_diff, PolicyPeriod, TemporalError};
