//! Behaviour tests for the live quote service over a faked transport.
//!
//! These verify HOW upstream failures are handled: a lost exchange rate is
//! replaced by the fallback and reported, a lost spot price is never replaced.

use bullion_core::{
    data_source::SourceErrorKind, CannedHttpClient, HttpError, HttpResponse, MarketQuoteService,
    MetalKind, ProviderId, QuoteConfig, QuoteService, RateOrigin,
};
use bullion_tests::{
    service_with_rates, Arc, EXCHANGE_RATE_BASE_URL, GOLDPRICE_BASE_URL, RATES_BODY,
};

// =============================================================================
// Quote Service: Live Rate
// =============================================================================

#[tokio::test]
async fn when_both_upstreams_answer_the_quote_is_live() {
    // Given: both feeds answer normally
    let (service, _) = service_with_rates(Ok(HttpResponse::ok_json(RATES_BODY)), QuoteConfig::default());

    // When: gold and silver are quoted together
    let batch = service
        .quotes(vec![MetalKind::Gold, MetalKind::Silver])
        .await
        .expect("quotes");

    // Then: both share the live rate and no warning is raised
    for quote in &batch.quotes {
        assert_eq!(quote.rate_origin, RateOrigin::Live);
        assert_eq!(quote.quote.usd_to_local_rate, 83.0);
        assert_eq!(quote.currency, "INR");
    }
    assert_eq!(batch.source_chain, vec![ProviderId::Goldprice, ProviderId::Exchangerate]);
    assert!(batch.warnings.is_empty());
}

#[tokio::test]
async fn configured_currency_selects_its_rate() {
    // Given: a service converting into EUR
    let config = QuoteConfig::new("eur", 0.9, 2_000).expect("config");
    let (service, _) = service_with_rates(Ok(HttpResponse::ok_json(RATES_BODY)), config);

    // When: silver is quoted
    let batch = service.quote(MetalKind::Silver).await.expect("quote");

    // Then: the EUR rate from the table is used
    let quote = batch.quote(MetalKind::Silver).expect("silver");
    assert_eq!(quote.currency, "EUR");
    assert_eq!(quote.quote.usd_to_local_rate, 0.92);
}

// =============================================================================
// Quote Service: Fallback Rate
// =============================================================================

#[tokio::test]
async fn when_the_rate_feed_errors_the_fallback_is_used_and_flagged() {
    let failures = [
        Err(HttpError::timeout("request timed out")),
        Ok(HttpResponse::with_status(503, "service unavailable")),
        Ok(HttpResponse::ok_json("<html>")),
        Ok(HttpResponse::ok_json(r#"{"rates":{"EUR":0.92}}"#)),
        Ok(HttpResponse::ok_json(r#"{"rates":{"INR":-1}}"#)),
    ];

    for failure in failures {
        // Given: a rate feed that cannot supply a usable INR rate
        let config = QuoteConfig::new("INR", 82.5, 1_000).expect("config");
        let (service, _) = service_with_rates(failure, config);

        // When: gold is quoted
        let batch = service.quote(MetalKind::Gold).await.expect("spot is still available");

        // Then: the fallback rate is substituted and the substitution is visible
        let quote = batch.quote(MetalKind::Gold).expect("gold");
        assert_eq!(quote.quote.usd_to_local_rate, 82.5);
        assert_eq!(quote.rate_origin, RateOrigin::Fallback);
        assert_eq!(batch.source_chain, vec![ProviderId::Goldprice, ProviderId::Fallback]);
        assert_eq!(batch.warnings.len(), 1);
        assert!(batch.warnings[0].contains("fallback rate 82.50"));
    }
}

// =============================================================================
// Quote Service: Spot Failures
// =============================================================================

#[tokio::test]
async fn when_the_spot_feed_is_down_no_price_is_produced() {
    // Given: the spot feed refuses connections
    let client = CannedHttpClient::new()
        .with_error(GOLDPRICE_BASE_URL, HttpError::new("connection refused"))
        .with_response(EXCHANGE_RATE_BASE_URL, HttpResponse::ok_json(RATES_BODY));
    let service = MarketQuoteService::over_transport(Arc::new(client), QuoteConfig::default());

    // When: silver is quoted
    let err = service.quote(MetalKind::Silver).await.expect_err("must fail");

    // Then: the failure is a retryable unavailability attributed to goldprice
    assert_eq!(err.kind(), SourceErrorKind::Unavailable);
    assert!(err.retryable());
    assert_eq!(err.provider(), Some(ProviderId::Goldprice));
}

#[tokio::test]
async fn when_the_spot_feed_has_no_items_the_data_is_unavailable() {
    let client = CannedHttpClient::new()
        .with_response(GOLDPRICE_BASE_URL, HttpResponse::ok_json(r#"{"items":[]}"#))
        .with_response(EXCHANGE_RATE_BASE_URL, HttpResponse::ok_json(RATES_BODY));
    let service = MarketQuoteService::over_transport(Arc::new(client), QuoteConfig::default());

    let err = service.quote(MetalKind::Gold).await.expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::Unavailable);
}

#[tokio::test]
async fn when_a_metal_price_is_zero_it_is_not_found() {
    let client = CannedHttpClient::new()
        .with_response(
            GOLDPRICE_BASE_URL,
            HttpResponse::ok_json(r#"{"items":[{"xauPrice":2000.0,"xagPrice":0}]}"#),
        )
        .with_response(EXCHANGE_RATE_BASE_URL, HttpResponse::ok_json(RATES_BODY));
    let service = MarketQuoteService::over_transport(Arc::new(client), QuoteConfig::default());

    let err = service.quote(MetalKind::Silver).await.expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::NotFound);
    assert_eq!(err.code(), "source.not_found");
}

// =============================================================================
// Quote Service: Transport
// =============================================================================

#[tokio::test]
async fn upstream_requests_carry_site_headers_and_timeout() {
    // Given: a service with a 2.5 s timeout
    let config = QuoteConfig::new("INR", 83.0, 2_500).expect("config");
    let (service, client) = service_with_rates(Ok(HttpResponse::ok_json(RATES_BODY)), config);

    // When: a quote is fetched
    service.quote(MetalKind::Gold).await.expect("quote");

    // Then: each feed is called once with the timeout, and goldprice gets its referer
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|request| request.timeout_ms == 2_500));

    let spot = requests
        .iter()
        .find(|request| request.url.starts_with(GOLDPRICE_BASE_URL))
        .expect("spot request");
    assert_eq!(spot.url, "https://data-asg.goldprice.org/dbXRates/USD");
    assert_eq!(
        spot.headers.get("referer").map(String::as_str),
        Some("https://goldprice.org/")
    );
    assert!(spot.headers.contains_key("user-agent"));
}
