use bullion_core::{
    MetalKind, PriceReport, ProviderId, QuoteService, RatioReport, SourceError,
};
use serde::Serialize;

use crate::error::CliError;

use super::{source_failure, CommandResult};

#[derive(Debug, Serialize)]
pub(crate) struct RatioSummary {
    pub ratio: RatioReport,
    pub gold: PriceReport,
    pub silver: PriceReport,
    #[serde(skip)]
    pub source_chain: Vec<ProviderId>,
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl RatioSummary {
    pub fn render_text(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}",
            self.ratio.render_text(),
            self.gold.render_text(),
            self.silver.render_text()
        )
    }
}

/// Prices both metals from one spot snapshot and relates them.
pub(crate) async fn summarize(service: &dyn QuoteService) -> Result<RatioSummary, SourceError> {
    let batch = service.quotes(MetalKind::ALL.to_vec()).await?;
    let (Some(gold), Some(silver)) = (batch.quote(MetalKind::Gold), batch.quote(MetalKind::Silver))
    else {
        return Err(SourceError::not_found(
            "spot response lacks gold or silver price",
        ));
    };

    let internal = |error: bullion_core::PricingError| SourceError::internal(error.to_string());
    Ok(RatioSummary {
        ratio: RatioReport::new(
            gold.quote.spot_price_usd_per_ounce,
            silver.quote.spot_price_usd_per_ounce,
        )
        .map_err(internal)?,
        gold: PriceReport::from_sourced(gold).map_err(internal)?,
        silver: PriceReport::from_sourced(silver).map_err(internal)?,
        source_chain: batch.source_chain.clone(),
        warnings: batch.warnings.clone(),
    })
}

pub(crate) fn failure_text(error: &SourceError) -> String {
    format!(
        "❌ Error fetching data for ratio calculation: {}",
        error.message()
    )
}

pub async fn run(service: &dyn QuoteService) -> Result<CommandResult, CliError> {
    match summarize(service).await {
        Ok(summary) => {
            let text = summary.render_text();
            let data = serde_json::to_value(&summary)?;
            Ok(CommandResult::ok(data, summary.source_chain)
                .with_rate_origin(summary.gold.rate_origin)
                .with_text(text)
                .with_warnings(summary.warnings))
        }
        Err(error) => source_failure(&error, failure_text(&error)),
    }
}
