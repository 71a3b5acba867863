use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PricingError;

/// Precious metals the engine knows how to price.
///
/// Every variant carries its own import-duty rate, so adding a metal is a
/// compile-time change that every `match` below has to account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalKind {
    Gold,
    Silver,
}

impl MetalKind {
    pub const ALL: [Self; 2] = [Self::Gold, Self::Silver];

    /// Lowercase selector accepted on the command line and by the tool boundary.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
        }
    }

    /// Import duty as a fraction of the local base price.
    pub const fn import_duty_rate(self) -> f64 {
        match self {
            Self::Gold => 0.06,
            Self::Silver => 0.075,
        }
    }

    /// Field carrying this metal's USD spot price in the goldprice.org feed.
    pub const fn price_key(self) -> &'static str {
        match self {
            Self::Gold => "xauPrice",
            Self::Silver => "xagPrice",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|metal| metal.label()).collect()
    }
}

impl Display for MetalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetalKind {
    type Err = PricingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(Self::Gold),
            "silver" => Ok(Self::Silver),
            other => Err(PricingError::UnknownMetal {
                value: other.to_owned(),
                valid: Self::labels(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" GOLD ".parse::<MetalKind>(), Ok(MetalKind::Gold));
        assert_eq!("Silver".parse::<MetalKind>(), Ok(MetalKind::Silver));
    }

    #[test]
    fn rejects_unknown_metal_with_choices() {
        let err = "platinum".parse::<MetalKind>().expect_err("must fail");
        match err {
            PricingError::UnknownMetal { value, valid } => {
                assert_eq!(value, "platinum");
                assert_eq!(valid, vec!["gold", "silver"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duty_rates_are_fixed_per_metal() {
        assert_eq!(MetalKind::Gold.import_duty_rate(), 0.06);
        assert_eq!(MetalKind::Silver.import_duty_rate(), 0.075);
    }
}
