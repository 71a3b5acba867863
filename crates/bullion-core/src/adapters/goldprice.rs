use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::data_source::{SourceError, SpotPriceSource, SpotSnapshot};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ProviderId, UtcDateTime};

use super::BROWSER_HEADERS;

pub const GOLDPRICE_BASE_URL: &str = "https://data-asg.goldprice.org";

/// The feed rejects requests that do not look like they come from goldprice.org.
const SITE_HEADERS: [(&str, &str); 6] = [
    ("referer", "https://goldprice.org/"),
    ("origin", "https://goldprice.org"),
    ("dnt", "1"),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
];

/// Spot-price adapter for the goldprice.org USD rates feed.
#[derive(Clone)]
pub struct GoldpriceAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl GoldpriceAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(GOLDPRICE_BASE_URL),
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

    fn endpoint(&self) -> String {
        format!("{}/dbXRates/USD", self.base_url.trim_end_matches('/'))
    }

    async fn fetch_snapshot(&self) -> Result<SpotSnapshot, SourceError> {
        let request = HttpRequest::get(self.endpoint())
            .with_headers(BROWSER_HEADERS)
            .with_headers(SITE_HEADERS)
            .with_timeout_ms(self.timeout_ms);
        debug!(url = %request.url, "requesting spot prices");

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("goldprice transport error: {}", error.message()))
                .from_provider(ProviderId::Goldprice)
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "goldprice upstream returned status {}",
                response.status
            ))
            .from_provider(ProviderId::Goldprice));
        }

        parse_spot_response(&response.body)
    }
}

impl SpotPriceSource for GoldpriceAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Goldprice
    }

    fn spot_prices<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<SpotSnapshot, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_snapshot())
    }
}

#[derive(Debug, Deserialize)]
struct GoldpriceResponse {
    #[serde(default)]
    tsj: Option<i64>,
    #[serde(default)]
    items: Vec<GoldpriceItem>,
}

#[derive(Debug, Deserialize)]
struct GoldpriceItem {
    #[serde(rename = "xauPrice", default)]
    xau_price: Option<f64>,
    #[serde(rename = "xagPrice", default)]
    xag_price: Option<f64>,
}

fn parse_spot_response(body: &str) -> Result<SpotSnapshot, SourceError> {
    let payload: GoldpriceResponse = serde_json::from_str(body).map_err(|e| {
        SourceError::invalid_response(format!("failed to parse goldprice response: {e}"))
            .from_provider(ProviderId::Goldprice)
    })?;

    let Some(item) = payload.items.into_iter().next() else {
        return Err(SourceError::unavailable("goldprice response contained no price items")
            .from_provider(ProviderId::Goldprice));
    };

    let as_of = payload
        .tsj
        .and_then(UtcDateTime::from_unix_millis)
        .unwrap_or_else(UtcDateTime::now);

    Ok(SpotSnapshot {
        gold_usd: usable_price(item.xau_price),
        silver_usd: usable_price(item.xag_price),
        as_of,
    })
}

// A zero or garbage price is treated the same as a missing one.
fn usable_price(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{CannedHttpClient, HttpError, HttpResponse};
    use crate::MetalKind;

    const BODY: &str = r#"{"ts":1704067200000,"tsj":1704067200000,"date":"Jan 1st 2024","items":[{"curr":"USD","xauPrice":2063.72,"xagPrice":23.79,"chgXau":1.2}]}"#;

    #[tokio::test]
    async fn parses_both_metals_from_first_item() {
        let client = Arc::new(
            CannedHttpClient::new().with_response(GOLDPRICE_BASE_URL, HttpResponse::ok_json(BODY)),
        );
        let adapter = GoldpriceAdapter::new(client.clone());

        let snapshot = adapter.spot_prices().await.expect("spot prices");
        assert_eq!(snapshot.price(MetalKind::Gold), Some(2063.72));
        assert_eq!(snapshot.price(MetalKind::Silver), Some(23.79));
        assert_eq!(snapshot.as_of.format_rfc3339(), "2024-01-01T00:00:00Z");

        let requests = client.recorded_requests();
        assert_eq!(requests[0].url, "https://data-asg.goldprice.org/dbXRates/USD");
        assert_eq!(
            requests[0].headers.get("referer").map(String::as_str),
            Some("https://goldprice.org/")
        );
        assert_eq!(requests[0].timeout_ms, 10_000);
    }

    #[tokio::test]
    async fn empty_items_mean_data_unavailable() {
        let client = Arc::new(CannedHttpClient::new().with_response(
            GOLDPRICE_BASE_URL,
            HttpResponse::ok_json(r#"{"items":[]}"#),
        ));
        let err = GoldpriceAdapter::new(client)
            .spot_prices()
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::Unavailable);
        assert_eq!(err.provider(), Some(ProviderId::Goldprice));
    }

    #[tokio::test]
    async fn zero_price_is_reported_missing() {
        let client = Arc::new(CannedHttpClient::new().with_response(
            GOLDPRICE_BASE_URL,
            HttpResponse::ok_json(r#"{"items":[{"xauPrice":2000.0,"xagPrice":0}]}"#),
        ));
        let snapshot = GoldpriceAdapter::new(client)
            .spot_prices()
            .await
            .expect("spot prices");
        assert_eq!(snapshot.price(MetalKind::Silver), None);
    }

    #[tokio::test]
    async fn transport_and_status_failures_are_unavailable() {
        let failing = Arc::new(
            CannedHttpClient::new().with_error(GOLDPRICE_BASE_URL, HttpError::timeout("timed out")),
        );
        let err = GoldpriceAdapter::new(failing)
            .spot_prices()
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::Unavailable);

        let forbidden = Arc::new(CannedHttpClient::new().with_response(
            GOLDPRICE_BASE_URL,
            HttpResponse::with_status(403, "forbidden"),
        ));
        let err = GoldpriceAdapter::new(forbidden)
            .spot_prices()
            .await
            .expect_err("must fail");
        assert!(err.message().contains("403"));
    }

    #[tokio::test]
    async fn garbled_body_is_invalid_response() {
        let client = Arc::new(
            CannedHttpClient::new().with_response(GOLDPRICE_BASE_URL, HttpResponse::ok_json("<html>")),
        );
        let err = GoldpriceAdapter::new(client)
            .spot_prices()
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::InvalidResponse);
    }
}
