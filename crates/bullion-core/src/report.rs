//! Presentation of computed prices.
//!
//! Everything here rounds to two decimals for display only; the structured
//! [`PriceReport`] keeps the calculator's full-precision figures.

use serde::{Deserialize, Serialize};

use crate::calculator::{compute_quote, gold_silver_ratio, BreakdownPair, PriceBreakdown};
use crate::{
    MetalKind, PricingError, RateOrigin, RawQuote, SourcedQuote, UtcDateTime, GRAMS_PER_OUNCE,
};

/// Complete, display-ready result of pricing one metal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    pub metal: MetalKind,
    pub currency: String,
    pub usd_to_local_rate: f64,
    pub rate_origin: RateOrigin,
    pub as_of: UtcDateTime,
    pub breakdown: BreakdownPair,
}

impl PriceReport {
    pub fn from_sourced(sourced: &SourcedQuote) -> Result<Self, PricingError> {
        Ok(Self {
            metal: sourced.quote.metal,
            currency: sourced.currency.clone(),
            usd_to_local_rate: sourced.quote.usd_to_local_rate,
            rate_origin: sourced.rate_origin,
            as_of: sourced.as_of,
            breakdown: compute_quote(&sourced.quote)?,
        })
    }

    /// Report for caller-supplied figures, stamped with the current time.
    pub fn from_raw(quote: &RawQuote, currency: impl Into<String>) -> Result<Self, PricingError> {
        Ok(Self {
            metal: quote.metal,
            currency: currency.into(),
            usd_to_local_rate: quote.usd_to_local_rate,
            rate_origin: RateOrigin::Live,
            as_of: UtcDateTime::now(),
            breakdown: compute_quote(quote)?,
        })
    }

    pub fn render_text(&self) -> String {
        let metal = self.metal;
        let policy = self.breakdown.policy;
        let local = currency_symbol(&self.currency);
        let gst_percent = policy.gst_rate * 100.0;
        let duty_percent = policy.import_duty_rate * 100.0;
        let fallback_note = match self.rate_origin {
            RateOrigin::Live => "",
            RateOrigin::Fallback => " (fallback rate, live rate unavailable)",
        };

        let mut lines = vec![
            format!("{} Current {} Price:", metal.symbol(), metal.title()),
            String::new(),
            format!("🔄 Conversion: 1 Ounce = {GRAMS_PER_OUNCE:.4} grams"),
            String::new(),
            String::from("📈 Per Ounce:"),
        ];
        lines.extend(self.unit_lines(&self.breakdown.per_ounce, &local, gst_percent, duty_percent));
        lines.push(String::new());
        lines.push(String::from("⚖️ Per 10 Grams:"));
        lines.extend(self.unit_lines(&self.breakdown.per_10g, &local, gst_percent, duty_percent));
        lines.push(String::new());
        lines.push(format!(
            "📊 Exchange Rate: 1 USD = {local}{}{fallback_note}",
            format_amount(self.usd_to_local_rate)
        ));
        lines.push(format!(
            "💼 Tax Summary: GST {gst_percent:.0}% + Import Duty {duty_percent:.1}% = Total {:.1}%",
            policy.total_rate() * 100.0
        ));
        lines.join("\n")
    }

    fn unit_lines(
        &self,
        unit: &PriceBreakdown,
        local: &str,
        gst_percent: f64,
        duty_percent: f64,
    ) -> [String; 5] {
        let code = self.currency.as_str();
        [
            format!("  USD: ${:.2}", unit.usd),
            format!("  {code} (Base): {local}{}", format_amount(unit.local_base)),
            format!(
                "  {code} + GST ({gst_percent:.0}%): {local}{} (GST: {local}{})",
                format_amount(unit.local_with_gst),
                format_amount(unit.gst_amount)
            ),
            format!(
                "  {code} + Import Duty ({duty_percent:.1}%): {local}{} (Duty: {local}{})",
                format_amount(unit.local_with_duty),
                format_amount(unit.duty_amount)
            ),
            format!(
                "  Market Price (GST + Duty): {local}{}",
                format_amount(unit.local_total_with_tax)
            ),
        ]
    }
}

/// Gold priced in ounces of silver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioReport {
    pub gold_usd_per_ounce: f64,
    pub silver_usd_per_ounce: f64,
    pub gold_silver_ratio: f64,
}

impl RatioReport {
    pub fn new(gold_usd_per_ounce: f64, silver_usd_per_ounce: f64) -> Result<Self, PricingError> {
        Ok(Self {
            gold_usd_per_ounce,
            silver_usd_per_ounce,
            gold_silver_ratio: gold_silver_ratio(gold_usd_per_ounce, silver_usd_per_ounce)?,
        })
    }

    pub fn render_text(&self) -> String {
        format!(
            "⚖️ Gold/Silver Ratio: {:.2}\n  Gold: ${:.2} per ounce\n  Silver: ${:.2} per ounce\n  1 ounce of gold buys {:.2} ounces of silver",
            self.gold_silver_ratio,
            self.gold_usd_per_ounce,
            self.silver_usd_per_ounce,
            self.gold_silver_ratio
        )
    }
}

/// Display prefix for a currency code.
pub fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => String::from("$"),
        "INR" => String::from("₹"),
        "EUR" => String::from("€"),
        "GBP" => String::from("£"),
        other => format!("{other} "),
    }
}

/// Two-decimal amount with `,` thousands separators.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|ch| ch != '0' && ch != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}
