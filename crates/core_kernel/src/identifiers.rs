//! Strongly-typed identifiers for domain entities
//!
//! Claim identifiers are plain integers assigned either by the caller or by
//! the store. Wrapping them in a newtype keeps them from being confused with
//! other integer values such as counts or sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Identifier of a lecturer claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(i64);

impl ClaimId {
    /// Creates an identifier from its raw value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns the identifier prefix for display
    pub fn prefix() -> &'static str {
        "CLM"
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::prefix(), self.0)
    }
}

impl FromStr for ClaimId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Strip prefix if present
        let raw = s.strip_prefix("CLM-").unwrap_or(s);
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| CoreError::validation(format!("invalid claim id '{}': {}", s, e)))
    }
}

impl From<i64> for ClaimId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ClaimId> for i64 {
    fn from(id: ClaimId) -> i64 {
        id.0
    }
}
