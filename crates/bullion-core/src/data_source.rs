//! Upstream source contracts and their error type.
//!
//! | Trait | Provides | Implemented by |
//! |-------|----------|----------------|
//! | [`SpotPriceSource`] | USD spot price per troy ounce for every metal | [`GoldpriceAdapter`](crate::adapters::GoldpriceAdapter) |
//! | [`ExchangeRateSource`] | USD to local currency rate | [`ExchangeRateAdapter`](crate::adapters::ExchangeRateAdapter) |
//!
//! Both return boxed futures so they can be held as trait objects.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{MetalKind, ProviderId, UtcDateTime};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure, timeout, or non-success status.
    Unavailable,
    /// The upstream answered but the requested figure was absent.
    NotFound,
    /// The upstream body could not be decoded.
    InvalidResponse,
    Internal,
}

/// Structured source error; the "upstream data unavailable" family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
    provider: Option<ProviderId>,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message, true)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound, message, false)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidResponse, message, false)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message, false)
    }

    fn new(kind: SourceErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            provider: None,
        }
    }

    pub fn from_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
        self
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// USD spot prices per troy ounce captured from one upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotSnapshot {
    pub gold_usd: Option<f64>,
    pub silver_usd: Option<f64>,
    pub as_of: UtcDateTime,
}

impl SpotSnapshot {
    pub const fn price(&self, metal: MetalKind) -> Option<f64> {
        match metal {
            MetalKind::Gold => self.gold_usd,
            MetalKind::Silver => self.silver_usd,
        }
    }
}

/// Source of USD spot prices.
pub trait SpotPriceSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Fetches the current spot prices for every metal in one call.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the upstream is unreachable, answers with a
    /// non-success status, or sends a body without any price items.
    fn spot_prices<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<SpotSnapshot, SourceError>> + Send + 'a>>;
}

/// Source of USD to local-currency conversion rates.
pub trait ExchangeRateSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Fetches how many units of `currency` one US dollar buys.
    fn usd_rate<'a>(
        &'a self,
        currency: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<f64, SourceError>> + Send + 'a>>;
}
