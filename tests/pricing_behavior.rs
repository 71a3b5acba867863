//! Behaviour tests for the price calculator.
//!
//! These verify the arithmetic contract: additive taxes, the per-10-gram
//! conversion, and rejection of inputs no price can be computed from.

use bullion_core::{
    compute_breakdown, compute_quote, gold_silver_ratio, MetalKind, PriceReport, PricingError,
    RawQuote, GRAMS_PER_OUNCE, GST_RATE,
};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

// =============================================================================
// Pricing: Reference Scenarios
// =============================================================================

#[test]
fn when_gold_is_2000_at_83_the_market_price_is_180940() {
    // Given: gold at 2000 USD/oz and 83 INR per USD
    let quote = RawQuote::new(MetalKind::Gold, 2000.0, 83.0).expect("valid quote");

    // When: the price is computed
    let pair = compute_quote(&quote).expect("computes");

    // Then: GST and the 6% duty are both taken on the local base
    let ounce = pair.per_ounce;
    assert!(close(ounce.usd, 2000.0));
    assert!(close(ounce.local_base, 166_000.0));
    assert!(close(ounce.gst_amount, 4_980.0));
    assert!(close(ounce.local_with_gst, 170_980.0));
    assert!(close(ounce.duty_amount, 9_960.0));
    assert!(close(ounce.local_with_duty, 175_960.0));
    assert!(close(ounce.local_total_with_tax, 180_940.0));
}

#[test]
fn when_silver_is_25_at_83_the_duty_is_seven_and_a_half_percent() {
    // Given: silver at 25 USD/oz and 83 INR per USD
    // When: the price is computed
    let pair = compute_breakdown(MetalKind::Silver, 25.0, 83.0).expect("computes");

    // Then: the 7.5% duty applies
    let ounce = pair.per_ounce;
    assert!(close(ounce.local_base, 2_075.0));
    assert!(close(ounce.gst_amount, 62.25));
    assert!(close(ounce.duty_amount, 155.625));
    assert!(close(ounce.local_total_with_tax, 2_292.875));
    assert!(close(pair.policy.total_rate(), 0.105));
}

#[test]
fn ten_gram_figures_follow_the_troy_ounce() {
    // Given: the gold reference scenario
    let pair = compute_breakdown(MetalKind::Gold, 2000.0, 83.0).expect("computes");

    // Then: 10 g is 10/31.1035 of an ounce, in both currencies
    assert!(close(pair.per_10g.usd * GRAMS_PER_OUNCE / 10.0, pair.per_ounce.usd));
    assert!(close(
        pair.per_10g.local_base * GRAMS_PER_OUNCE / 10.0,
        pair.per_ounce.local_base
    ));
    assert!((pair.per_10g.usd - 643.0145).abs() < 1e-3);
    assert!((pair.per_10g.local_base - 53_370.1995).abs() < 1e-3);
}

// =============================================================================
// Pricing: Invariants
// =============================================================================

#[test]
fn total_is_base_plus_gst_plus_duty_for_any_positive_input() {
    let spots = [0.01, 1.0, 25.0, 1_234.56, 2_000.0, 99_999.99];
    let rates = [0.0001, 0.79, 1.0, 83.0, 1_500.25];

    for metal in MetalKind::ALL {
        let duty = metal.import_duty_rate();
        for spot in spots {
            for rate in rates {
                // Given: any positive spot and rate
                let local_base = spot * rate;

                // When: the breakdown is computed
                let pair = compute_breakdown(metal, spot, rate).expect("computes");

                // Then: every taxed figure is the base scaled by the published rates
                let ounce = pair.per_ounce;
                let expected = local_base * (1.0 + GST_RATE + duty);
                assert!(
                    close(ounce.local_total_with_tax, expected),
                    "{metal} {spot} @ {rate}: {} != {expected}",
                    ounce.local_total_with_tax
                );
                assert!(close(ounce.local_base, local_base));
                assert!(close(ounce.gst_amount, local_base * GST_RATE));
                assert!(close(ounce.duty_amount, local_base * duty));

                let base_10g = local_base * 10.0 / GRAMS_PER_OUNCE;
                assert!(close(
                    pair.per_10g.local_total_with_tax,
                    base_10g * (1.0 + GST_RATE + duty)
                ));
            }
        }
    }
}

#[test]
fn identical_inputs_give_identical_breakdowns() {
    let first = compute_breakdown(MetalKind::Silver, 31.07, 84.12).expect("computes");
    let second = compute_breakdown(MetalKind::Silver, 31.07, 84.12).expect("computes");
    assert_eq!(first, second);
}

// =============================================================================
// Pricing: Rejected Inputs
// =============================================================================

#[test]
fn when_spot_or_rate_is_unusable_the_calculator_reports_invalid_input() {
    let unusable = [0.0, -1.0, f64::NAN, f64::INFINITY];

    for value in unusable {
        let spot = compute_breakdown(MetalKind::Gold, value, 83.0).expect_err("bad spot");
        assert!(
            matches!(spot, PricingError::InvalidInput { field, .. } if field.contains("spot")),
            "{value} accepted as spot"
        );

        let rate = compute_breakdown(MetalKind::Gold, 2000.0, value).expect_err("bad rate");
        assert!(
            matches!(rate, PricingError::InvalidInput { field, .. } if field.contains("rate")),
            "{value} accepted as rate"
        );
    }
}

#[test]
fn when_the_rate_is_missing_the_quote_is_rejected() {
    // Given: a spot price but no conversion rate
    // When: a raw quote is assembled
    let err = RawQuote::from_optional(MetalKind::Silver, Some(25.0), None).expect_err("missing");

    // Then: the missing value is reported as invalid input
    assert_eq!(err.code(), "pricing.invalid_input");
}

#[test]
fn when_the_converted_price_overflows_it_is_rejected_not_returned_as_infinity() {
    // Given: inputs that are each finite but whose product is not
    // When: the price is computed
    let err = compute_breakdown(MetalKind::Gold, 1e200, 1e200).expect_err("overflow");

    // Then: no infinite price escapes to the report or the JSON envelope
    assert_eq!(err, PricingError::OutOfRange { field: "local_base" });
    assert_eq!(err.code(), "pricing.out_of_range");
    assert!(PriceReport::from_raw(
        &RawQuote::new(MetalKind::Gold, 1e200, 1e200).expect("inputs are finite"),
        "INR"
    )
    .is_err());
}

#[test]
fn when_an_unknown_metal_is_named_the_valid_choices_are_listed() {
    // Given: a metal outside the supported set
    // When: it is parsed
    let err = "platinum".parse::<MetalKind>().expect_err("unknown");

    // Then: the error names the bad value and lists gold and silver
    let message = err.to_string();
    assert!(message.contains("platinum"));
    assert!(message.contains("\"gold\", \"silver\""));
    assert_eq!(err.code(), "pricing.unknown_metal");
}

// =============================================================================
// Pricing: Ratio and Reports
// =============================================================================

#[test]
fn gold_silver_ratio_divides_spot_prices() {
    assert!(close(gold_silver_ratio(2000.0, 25.0).expect("ratio"), 80.0));
    assert!(gold_silver_ratio(2000.0, 0.0).is_err());
}

#[test]
fn report_text_rounds_and_groups_thousands() {
    let quote = RawQuote::new(MetalKind::Gold, 2345.678, 83.456).expect("valid quote");
    let report = PriceReport::from_raw(&quote, "INR").expect("report");
    let text = report.render_text();

    // 2345.678 * 83.456 = 195,760.90...
    assert!(text.contains("  USD: $2345.68"));
    assert!(text.contains("INR (Base): ₹195,760.9"));
    assert!(text.contains("📊 Exchange Rate: 1 USD = ₹83.46"));
}
