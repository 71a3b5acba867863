//! # Domain Models
//!
//! Canonical domain types for bullion pricing.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MetalKind`] | Closed set of priced metals with their duty rates |
//! | [`TaxPolicy`] | GST plus per-metal import duty |
//! | [`RawQuote`] | Validated spot price and conversion rate |
//! | [`SourcedQuote`] | Raw quote with currency, rate origin, and timestamp |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Construction validates invariants: a [`RawQuote`] can only hold finite,
//! strictly positive numbers.

mod metal;
mod quote;
mod tax;
mod timestamp;

pub use metal::MetalKind;
pub use quote::{RateOrigin, RawQuote, SourcedQuote};
pub(crate) use quote::require_positive;
pub use tax::{TaxPolicy, GRAMS_PER_OUNCE, GST_RATE};
pub use timestamp::UtcDateTime;

use crate::ValidationError;

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}
