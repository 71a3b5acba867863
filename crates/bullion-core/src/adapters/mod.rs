mod exchange_rate;
mod goldprice;

pub use exchange_rate::{ExchangeRateAdapter, EXCHANGE_RATE_BASE_URL};
pub use goldprice::{GoldpriceAdapter, GOLDPRICE_BASE_URL};

use crate::http_client::{CannedHttpClient, HttpResponse};

/// Headers sent with every upstream request.
pub(crate) const BROWSER_HEADERS: [(&str, &str); 3] = [
    (
        "user-agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    ),
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en-US,en;q=0.5"),
];

/// Offline transport serving fixed upstream bodies, used by `--mock`.
///
/// Gold 2000.00 and silver 25.00 USD per ounce; USD converts at 83.00 INR.
pub fn mock_transport() -> CannedHttpClient {
    CannedHttpClient::new()
        .with_response(
            GOLDPRICE_BASE_URL,
            HttpResponse::ok_json(
                r#"{"tsj":1704067200000,"items":[{"curr":"USD","xauPrice":2000.0,"xagPrice":25.0}]}"#,
            ),
        )
        .with_response(
            EXCHANGE_RATE_BASE_URL,
            HttpResponse::ok_json(
                r#"{"base":"USD","rates":{"USD":1.0,"INR":83.0,"EUR":0.92,"GBP":0.79}}"#,
            ),
        )
}
