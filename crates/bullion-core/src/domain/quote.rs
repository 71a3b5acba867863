use serde::{Deserialize, Serialize};

use crate::{MetalKind, PricingError, ProviderId, UtcDateTime};

/// Spot price and conversion rate for one metal, as handed to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    pub metal: MetalKind,
    pub spot_price_usd_per_ounce: f64,
    pub usd_to_local_rate: f64,
}

impl RawQuote {
    pub fn new(
        metal: MetalKind,
        spot_price_usd_per_ounce: f64,
        usd_to_local_rate: f64,
    ) -> Result<Self, PricingError> {
        Self::from_optional(metal, Some(spot_price_usd_per_ounce), Some(usd_to_local_rate))
    }

    /// Builds a quote from values that may be absent upstream.
    pub fn from_optional(
        metal: MetalKind,
        spot_price_usd_per_ounce: Option<f64>,
        usd_to_local_rate: Option<f64>,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            metal,
            spot_price_usd_per_ounce: require_positive(
                "spot_price_usd_per_ounce",
                spot_price_usd_per_ounce,
            )?,
            usd_to_local_rate: require_positive("usd_to_local_rate", usd_to_local_rate)?,
        })
    }
}

/// Where the conversion rate of a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    Live,
    Fallback,
}

impl RateOrigin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
        }
    }

    /// Provider that supplied a rate of this origin.
    pub const fn provider(self) -> ProviderId {
        match self {
            Self::Live => ProviderId::Exchangerate,
            Self::Fallback => ProviderId::Fallback,
        }
    }
}

/// A raw quote together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedQuote {
    pub quote: RawQuote,
    pub currency: String,
    pub rate_origin: RateOrigin,
    pub as_of: UtcDateTime,
}

impl SourcedQuote {
    pub const fn is_fallback(&self) -> bool {
        matches!(self.rate_origin, RateOrigin::Fallback)
    }
}

pub(crate) fn require_positive(field: &'static str, value: Option<f64>) -> Result<f64, PricingError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        other => Err(PricingError::invalid_input(field, other)),
    }
}
