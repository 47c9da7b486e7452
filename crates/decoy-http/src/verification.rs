//! Invocation count verification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive bounds on how often a pattern may have been served.
///
/// With neither bound set every count is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_least: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_most: Option<u64>,
}

impl VerificationCriteria {
    pub fn at_least(n: u64) -> Self {
        Self {
            at_least: Some(n),
            at_most: None,
        }
    }

    pub fn at_most(n: u64) -> Self {
        Self {
            at_least: None,
            at_most: Some(n),
        }
    }

    pub fn equal_to(n: u64) -> Self {
        Self::between(n, n)
    }

    pub fn between(lower: u64, upper: u64) -> Self {
        Self {
            at_least: Some(lower),
            at_most: Some(upper),
        }
    }

    pub fn accept(&self, count: u64) -> bool {
        self.at_least.map_or(true, |lower| count >= lower)
            && self.at_most.map_or(true, |upper| count <= upper)
    }

    pub fn is_unbounded(&self) -> bool {
        self.at_least.is_none() && self.at_most.is_none()
    }
}

impl fmt::Display for VerificationCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.at_least, self.at_most) {
            (Some(lower), Some(upper)) if lower == upper => write!(f, "equal to {lower}"),
            (Some(lower), Some(upper)) => write!(f, "between {lower} and {upper}"),
            (Some(lower), None) => write!(f, "at least {lower}"),
            (None, Some(upper)) => write!(f, "at most {upper}"),
            (None, None) => f.write_str("any number"),
        }
    }
}

/// Observed invocation count outside the expected bounds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected invocation count to be {criteria} but was {actual}")]
pub struct VerificationError {
    pub criteria: VerificationCriteria,
    pub actual: u64,
}

pub fn verify(criteria: &VerificationCriteria, actual: u64) -> Result<(), VerificationError> {
    if criteria.accept(actual) {
        Ok(())
    } else {
        Err(VerificationError {
            criteria: *criteria,
            actual,
        })
    }
}
