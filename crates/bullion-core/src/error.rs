use thiserror::Error;

use crate::RateOrigin;

/// Validation and contract errors exposed by `bullion-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid source '{value}', expected one of goldprice, exchangerate, fallback, local")]
    InvalidSource { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("fallback exchange rate must be finite and greater than zero")]
    InvalidFallbackRate,
    #[error("upstream timeout must be greater than zero")]
    InvalidTimeout,

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("trace_id must be 32 hex characters")]
    InvalidTraceId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("source_chain must contain at least one source")]
    EmptySourceChain,

    #[error("rate_origin '{}' has no matching provider in source_chain", .origin.as_str())]
    RateOriginWithoutSource { origin: RateOrigin },
    #[error("a fallback-rate price must carry a warning")]
    UnflaggedFallbackRate,
}

/// Failures of the pure price computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid input: '{field}' must be a finite number greater than zero (got {value})")]
    InvalidInput { field: &'static str, value: String },

    #[error("'{field}' is too large to represent; check the spot price and exchange rate")]
    OutOfRange { field: &'static str },

    #[error("unknown metal '{value}', expected one of: {}", quoted_list(.valid))]
    UnknownMetal {
        value: String,
        valid: Vec<&'static str>,
    },
}

impl PricingError {
    pub(crate) fn invalid_input(field: &'static str, value: Option<f64>) -> Self {
        Self::InvalidInput {
            field,
            value: value.map_or_else(|| String::from("nothing"), |v| v.to_string()),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "pricing.invalid_input",
            Self::OutOfRange { .. } => "pricing.out_of_range",
            Self::UnknownMetal { .. } => "pricing.unknown_metal",
        }
    }
}

fn quoted_list(values: &[&'static str]) -> String {
    values
        .iter()
        .map(|value| format!("\"{value}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
