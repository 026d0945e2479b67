//! Strongly-typed identifiers for domain entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const POLICY_PREFIX: &str = "POL-";

/// Identifier of a sold policy
///
/// Backed by a v7 UUID, so identifiers sort roughly by creation time.
/// Displayed as `POL-<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(Uuid);

impl PolicyId {
    /// Creates a new time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{POLICY_PREFIX}{}", self.0)
    }
}

impl FromStr for PolicyId {
    type Err = uuid::Error;

    /// Accepts both the prefixed display form and a bare UUID
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid_str = s.strip_prefix(POLICY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid_str)?))
    }
}

impl From<Uuid> for PolicyId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_id_display_parses_back() {
        let id = PolicyId::new();
        assert!(id.to_string().starts_with("POL-"));
        let parsed: PolicyId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_policy_id_parses_bare_uuid() {
        let id = PolicyId::new();
        let parsed: PolicyId = id.as_uuid().to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
