use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers used in metadata and envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// goldprice.org spot feed.
    Goldprice,
    /// exchangerate-api.com conversion rates.
    Exchangerate,
    /// Configured fixed conversion rate.
    Fallback,
    /// Caller-supplied figures, no upstream involved.
    Local,
}

impl ProviderId {
    pub const ALL: [Self; 4] = [Self::Goldprice, Self::Exchangerate, Self::Fallback, Self::Local];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goldprice => "goldprice",
            Self::Exchangerate => "exchangerate",
            Self::Fallback => "fallback",
            Self::Local => "local",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "goldprice" => Ok(Self::Goldprice),
            "exchangerate" => Ok(Self::Exchangerate),
            "fallback" => Ok(Self::Fallback),
            "local" => Ok(Self::Local),
            other => Err(ValidationError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}
