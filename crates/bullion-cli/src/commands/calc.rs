use bullion_core::{MetalKind, PriceReport, ProviderId, RawQuote};

use crate::cli::CalcArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &CalcArgs, currency: &str) -> Result<CommandResult, CliError> {
    let metal = args.metal.parse::<MetalKind>()?;
    let quote = RawQuote::new(metal, args.spot, args.rate)?;
    let report = PriceReport::from_raw(&quote, currency)?;

    Ok(
        CommandResult::ok(serde_json::to_value(&report)?, vec![ProviderId::Local])
            .with_text(report.render_text()),
    )
}

#[cfg(test)]
mod tests {
    use bullion_core::PricingError;

    use super::*;

    fn calc(metal: &str, spot: f64, rate: f64) -> Result<CommandResult, CliError> {
        run(
            &CalcArgs {
                metal: metal.to_string(),
                spot,
                rate,
            },
            "INR",
        )
    }

    #[test]
    fn prices_gold_offline() {
        let result = calc("gold", 2000.0, 83.0).expect("priced");
        assert_eq!(result.source_chain, vec![ProviderId::Local]);
        let total = result.data["breakdown"]["per_ounce"]["local_total_with_tax"]
            .as_f64()
            .expect("numeric total");
        assert!((total - 180_940.0).abs() < 1e-6);
        assert!(result.text.expect("text").contains("₹180,940.00"));
    }

    #[test]
    fn rejects_zero_rate() {
        let err = calc("silver", 25.0, 0.0).err().expect("must fail");
        assert!(matches!(err, CliError::Pricing(PricingError::InvalidInput { .. })));
        assert_eq!(err.exit_code(), 2);
    }
}
