//! Pure price computation.
//!
//! [`compute_breakdown`] turns a USD spot price per troy ounce and a USD to
//! local conversion rate into taxed figures per ounce and per 10 grams. It
//! performs no I/O and holds no state, so it can be called from any thread.
//!
//! Both unit breakdowns are taxed from their own untaxed base, and the
//! 10-gram base is the ounce base scaled by `10 / GRAMS_PER_OUNCE`. Nothing
//! is rounded here; rounding is a presentation concern (see [`crate::report`]).

use serde::{Deserialize, Serialize};

use crate::domain::require_positive;
use crate::{MetalKind, PricingError, RawQuote, TaxPolicy, GRAMS_PER_OUNCE};

/// Taxed price figures for one unit of metal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub usd: f64,
    pub local_base: f64,
    pub local_with_gst: f64,
    pub gst_amount: f64,
    pub local_with_duty: f64,
    pub duty_amount: f64,
    pub local_total_with_tax: f64,
}

impl PriceBreakdown {
    fn taxed(usd: f64, local_base: f64, policy: TaxPolicy) -> Self {
        Self {
            usd,
            local_base,
            local_with_gst: local_base * (1.0 + policy.gst_rate),
            gst_amount: local_base * policy.gst_rate,
            local_with_duty: local_base * (1.0 + policy.import_duty_rate),
            duty_amount: local_base * policy.import_duty_rate,
            local_total_with_tax: local_base * (1.0 + policy.gst_rate + policy.import_duty_rate),
        }
    }

    /// First figure that overflowed to infinity, if any.
    fn overflowed_field(&self) -> Option<&'static str> {
        [
            ("usd", self.usd),
            ("local_base", self.local_base),
            ("local_with_gst", self.local_with_gst),
            ("gst_amount", self.gst_amount),
            ("local_with_duty", self.local_with_duty),
            ("duty_amount", self.duty_amount),
            ("local_total_with_tax", self.local_total_with_tax),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| field)
    }
}

/// Per-ounce and per-10-gram breakdowns derived from the same base price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownPair {
    pub metal: MetalKind,
    pub policy: TaxPolicy,
    pub per_ounce: PriceBreakdown,
    pub per_10g: PriceBreakdown,
}

pub fn compute_breakdown(
    metal: MetalKind,
    spot_usd_per_ounce: f64,
    usd_to_local_rate: f64,
) -> Result<BreakdownPair, PricingError> {
    let spot = require_positive("spot_usd_per_ounce", Some(spot_usd_per_ounce))?;
    let rate = require_positive("usd_to_local_rate", Some(usd_to_local_rate))?;
    let policy = TaxPolicy::for_metal(metal);

    let local_base_ounce = spot * rate;
    let usd_per_10g = spot / GRAMS_PER_OUNCE * 10.0;
    let local_base_10g = local_base_ounce / GRAMS_PER_OUNCE * 10.0;

    let per_ounce = PriceBreakdown::taxed(spot, local_base_ounce, policy);
    let per_10g = PriceBreakdown::taxed(usd_per_10g, local_base_10g, policy);
    if let Some(field) = per_ounce.overflowed_field().or_else(|| per_10g.overflowed_field()) {
        return Err(PricingError::OutOfRange { field });
    }

    Ok(BreakdownPair {
        metal,
        policy,
        per_ounce,
        per_10g,
    })
}

pub fn compute_quote(quote: &RawQuote) -> Result<BreakdownPair, PricingError> {
    compute_breakdown(
        quote.metal,
        quote.spot_price_usd_per_ounce,
        quote.usd_to_local_rate,
    )
}

/// Ounces of silver that buy one ounce of gold.
pub fn gold_silver_ratio(gold_usd_per_ounce: f64, silver_usd_per_ounce: f64) -> Result<f64, PricingError> {
    let gold = require_positive("gold_usd_per_ounce", Some(gold_usd_per_ounce))?;
    let silver = require_positive("silver_usd_per_ounce", Some(silver_usd_per_ounce))?;
    let ratio = gold / silver;
    if !ratio.is_finite() {
        return Err(PricingError::OutOfRange { field: "gold_silver_ratio" });
    }
    Ok(ratio)
}
