//! Supplies [`RawQuote`]s to the calculator.
//!
//! [`QuoteService`] is the seam between the pure calculator and the network.
//! [`MarketQuoteService`] is the live implementation: it asks a
//! [`SpotPriceSource`] and an [`ExchangeRateSource`] concurrently and, when
//! the conversion rate cannot be obtained, substitutes the configured
//! fallback rate and says so in the returned batch. A missing spot price is
//! never substituted.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adapters::{mock_transport, ExchangeRateAdapter, GoldpriceAdapter};
use crate::data_source::{ExchangeRateSource, SourceError, SpotPriceSource};
use crate::domain::validate_currency_code;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{MetalKind, ProviderId, RateOrigin, RawQuote, SourcedQuote, ValidationError};

pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_FALLBACK_RATE: f64 = 83.0;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Settings for fetching quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// ISO-4217 code prices are converted into.
    pub currency: String,
    /// Units of `currency` per USD used when the live rate is unavailable.
    pub fallback_rate: f64,
    /// Per-request upstream timeout.
    pub timeout_ms: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            currency: String::from(DEFAULT_CURRENCY),
            fallback_rate: DEFAULT_FALLBACK_RATE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl QuoteConfig {
    pub fn new(currency: &str, fallback_rate: f64, timeout_ms: u64) -> Result<Self, ValidationError> {
        if !fallback_rate.is_finite() || fallback_rate <= 0.0 {
            return Err(ValidationError::InvalidFallbackRate);
        }
        if timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(Self {
            currency: validate_currency_code(currency)?,
            fallback_rate,
            timeout_ms,
        })
    }
}

/// Quotes for one or more metals sharing a spot snapshot and a rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBatch {
    pub quotes: Vec<SourcedQuote>,
    pub source_chain: Vec<ProviderId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl QuoteBatch {
    pub fn quote(&self, metal: MetalKind) -> Option<&SourcedQuote> {
        self.quotes.iter().find(|quote| quote.quote.metal == metal)
    }
}

/// Provider of raw quotes for the calculator.
pub trait QuoteService: Send + Sync {
    /// Fetches quotes for every requested metal from a single upstream snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when spot data is unavailable or lacks one of
    /// the requested metals.
    fn quotes<'a>(
        &'a self,
        metals: Vec<MetalKind>,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteBatch, SourceError>> + Send + 'a>>;

    fn quote<'a>(
        &'a self,
        metal: MetalKind,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteBatch, SourceError>> + Send + 'a>> {
        self.quotes(vec![metal])
    }
}

/// Live quote service over a spot source and an exchange-rate source.
#[derive(Clone)]
pub struct MarketQuoteService {
    spot: Arc<dyn SpotPriceSource>,
    rates: Arc<dyn ExchangeRateSource>,
    config: QuoteConfig,
}

impl MarketQuoteService {
    pub fn new(
        spot: Arc<dyn SpotPriceSource>,
        rates: Arc<dyn ExchangeRateSource>,
        config: QuoteConfig,
    ) -> Self {
        Self { spot, rates, config }
    }

    /// Service backed by goldprice.org and exchangerate-api.com.
    pub fn live(config: QuoteConfig) -> Self {
        Self::over_transport(Arc::new(ReqwestHttpClient::new()), config)
    }

    /// Service answering from fixed offline data.
    pub fn mock(config: QuoteConfig) -> Self {
        Self::over_transport(Arc::new(mock_transport()), config)
    }

    pub fn over_transport(http_client: Arc<dyn HttpClient>, config: QuoteConfig) -> Self {
        let spot = GoldpriceAdapter::new(Arc::clone(&http_client)).with_timeout_ms(config.timeout_ms);
        let rates = ExchangeRateAdapter::new(http_client).with_timeout_ms(config.timeout_ms);
        Self::new(Arc::new(spot), Arc::new(rates), config)
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    async fn fetch(&self, metals: Vec<MetalKind>) -> Result<QuoteBatch, SourceError> {
        let currency = self.config.currency.as_str();
        let (spot, rate) = tokio::join!(self.spot.spot_prices(), self.rates.usd_rate(currency));

        let snapshot = spot.inspect_err(|error| {
            warn!(provider = %self.spot.id(), %error, "spot price unavailable");
        })?;

        let mut warnings = Vec::new();
        let (rate, rate_origin, rate_provider) = match rate {
            Ok(rate) => (rate, RateOrigin::Live, self.rates.id()),
            Err(error) => {
                warn!(
                    provider = %self.rates.id(),
                    %error,
                    fallback_rate = self.config.fallback_rate,
                    "exchange rate unavailable, using fallback"
                );
                warnings.push(format!(
                    "live USD/{currency} rate unavailable ({error}); using fallback rate {:.2}",
                    self.config.fallback_rate
                ));
                (self.config.fallback_rate, RateOrigin::Fallback, ProviderId::Fallback)
            }
        };
        debug!(rate, ?rate_origin, currency, "resolved exchange rate");

        let quotes = metals
            .into_iter()
            .map(|metal| -> Result<SourcedQuote, SourceError> {
                let spot = snapshot.price(metal).ok_or_else(|| {
                    SourceError::not_found(format!(
                        "{} price not found in spot response",
                        metal.title()
                    ))
                    .from_provider(self.spot.id())
                })?;
                let quote = RawQuote::new(metal, spot, rate)
                    .map_err(|error| SourceError::internal(error.to_string()))?;

                Ok(SourcedQuote {
                    quote,
                    currency: self.config.currency.clone(),
                    rate_origin,
                    as_of: snapshot.as_of,
                })
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        Ok(QuoteBatch {
            quotes,
            source_chain: vec![self.spot.id(), rate_provider],
            warnings,
        })
    }
}

impl QuoteService for MarketQuoteService {
    fn quotes<'a>(
        &'a self,
        metals: Vec<MetalKind>,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteBatch, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch(metals))
    }
}
