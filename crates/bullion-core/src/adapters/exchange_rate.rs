use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::data_source::{ExchangeRateSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::ProviderId;

use super::BROWSER_HEADERS;

pub const EXCHANGE_RATE_BASE_URL: &str = "https://api.exchangerate-api.com";

/// Conversion-rate adapter for the exchangerate-api.com v4 USD table.
#[derive(Clone)]
pub struct ExchangeRateAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl ExchangeRateAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(EXCHANGE_RATE_BASE_URL),
            timeout_ms: 10_000,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_rate(&self, currency: &str) -> Result<f64, SourceError> {
        let url = format!("{}/v4/latest/USD", self.base_url.trim_end_matches('/'));
        let request = HttpRequest::get(url)
            .with_headers(BROWSER_HEADERS)
            .with_timeout_ms(self.timeout_ms);
        debug!(url = %request.url, currency, "requesting exchange rate");

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("exchangerate transport error: {}", error.message()))
                .from_provider(ProviderId::Exchangerate)
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "exchangerate upstream returned status {}",
                response.status
            ))
            .from_provider(ProviderId::Exchangerate));
        }

        parse_rate(&response.body, currency)
    }
}

impl ExchangeRateSource for ExchangeRateAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Exchangerate
    }

    fn usd_rate<'a>(
        &'a self,
        currency: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<f64, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_rate(currency))
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

fn parse_rate(body: &str, currency: &str) -> Result<f64, SourceError> {
    let payload: RatesResponse = serde_json::from_str(body).map_err(|e| {
        SourceError::invalid_response(format!("failed to parse exchangerate response: {e}"))
            .from_provider(ProviderId::Exchangerate)
    })?;

    match payload.rates.get(currency) {
        Some(rate) if rate.is_finite() && *rate > 0.0 => Ok(*rate),
        Some(rate) => Err(SourceError::invalid_response(format!(
            "exchangerate returned unusable USD/{currency} rate {rate}"
        ))
        .from_provider(ProviderId::Exchangerate)),
        None => Err(SourceError::not_found(format!(
            "exchangerate response has no USD/{currency} rate"
        ))
        .from_provider(ProviderId::Exchangerate)),
    }
}
