use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// How a stored reference is compared against scanned attachment paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PathMatching {
    /// Compare the recorded string as-is against the canonical scanned path
    Exact,
    /// Resolve the recorded path before comparing; falls back to the raw
    /// string when it cannot be resolved
    #[default]
    Canonical,
}

impl std::fmt::Display for PathMatching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathMatching::Exact => write!(f, "exact"),
            PathMatching::Canonical => write!(f, "canonical"),
        }
    }
}

impl std::str::FromStr for PathMatching {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(PathMatching::Exact),
            "canonical" => Ok(PathMatching::Canonical),
            _ => Err(DomainError::InvalidPathMatching(s.to_string())),
        }
    }
}
