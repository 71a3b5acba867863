//! The `fetch_metal_price` tool.
//!
//! Agents call the tool with `{ "metal": "gold" | "silver" }`. A successful
//! call yields the human report plus the structured [`PriceReport`]; every
//! failure is translated into a single marked line (`❌ ...`) that tells the
//! caller what went wrong and, for a bad metal, what to send instead.

use bullion_core::{
    MetalKind, PriceReport, PricingError, ProviderId, QuoteService, SourceError, SourceErrorKind,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOOL_NAME: &str = "fetch_metal_price";

const TOOL_DESCRIPTION: &str = "Fetch the current gold or silver price with USD, local base, \
GST, import duty and total market price, per ounce and per 10 grams.";

/// Arguments accepted by `fetch_metal_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FetchMetalPriceArgs {
    /// Metal to price: "gold" or "silver".
    #[serde(default = "default_metal")]
    pub metal: String,
}

fn default_metal() -> String {
    MetalKind::Gold.label().to_string()
}

impl Default for FetchMetalPriceArgs {
    fn default() -> Self {
        Self {
            metal: default_metal(),
        }
    }
}

impl FetchMetalPriceArgs {
    /// Parses a JSON argument object; blank input means all defaults.
    pub fn from_json(raw: &str) -> Result<Self, ToolError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|error| ToolError::InvalidArguments(error.to_string()))
    }
}

/// Tool declaration as advertised to agents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn definition() -> Result<ToolDefinition, serde_json::Error> {
    let schema = schemars::schema_for!(FetchMetalPriceArgs);
    Ok(ToolDefinition {
        name: TOOL_NAME,
        description: TOOL_DESCRIPTION,
        input_schema: serde_json::to_value(schema)?,
    })
}

/// Successful tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    pub text: String,
    pub report: PriceReport,
    pub source_chain: Vec<ProviderId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("unable to fetch {metal} price data: {source}")]
    Upstream { metal: MetalKind, source: SourceError },
}

impl ToolError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) => "tool.invalid_arguments",
            Self::Pricing(error) => error.code(),
            Self::Upstream { source, .. } => source.code(),
        }
    }

    pub fn retryable(&self) -> bool {
        match self {
            Self::Upstream { source, .. } => source.retryable(),
            Self::InvalidArguments(_) | Self::Pricing(_) => false,
        }
    }

    pub fn provider(&self) -> Option<ProviderId> {
        match self {
            Self::Upstream { source, .. } => source.provider(),
            Self::InvalidArguments(_) | Self::Pricing(_) => None,
        }
    }

    /// Marked message returned to the calling agent in place of a report.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArguments(detail) => format!("❌ Invalid arguments: {detail}"),
            Self::Pricing(PricingError::UnknownMetal { value, valid }) => {
                let choices = valid
                    .iter()
                    .map(|label| format!("\"{label}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("❌ Invalid metal type: '{value}'\nPlease choose from: {choices}")
            }
            Self::Pricing(error) => format!("❌ Invalid price input: {error}"),
            Self::Upstream { source, .. } if source.kind() == SourceErrorKind::NotFound => {
                format!("❌ {}", source.message())
            }
            Self::Upstream { metal, source } => {
                format!("❌ Unable to fetch {metal} price data: {}", source.message())
            }
        }
    }
}

/// Runs the tool against `service`.
pub async fn invoke(
    service: &dyn QuoteService,
    args: FetchMetalPriceArgs,
) -> Result<ToolOutput, ToolError> {
    let metal = args.metal.parse::<MetalKind>()?;

    let batch = service
        .quote(metal)
        .await
        .map_err(|source| ToolError::Upstream { metal, source })?;
    let sourced = batch.quote(metal).ok_or_else(|| ToolError::Upstream {
        metal,
        source: SourceError::not_found(format!("{} price not found in spot response", metal.title())),
    })?;

    let report = PriceReport::from_sourced(sourced)?;
    Ok(ToolOutput {
        text: report.render_text(),
        report,
        source_chain: batch.source_chain,
        warnings: batch.warnings,
    })
}

/// Invokes the tool and flattens the outcome to the text an agent sees.
pub async fn respond(service: &dyn QuoteService, args: FetchMetalPriceArgs) -> String {
    match invoke(service, args).await {
        Ok(output) => output.text,
        Err(error) => error.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bullion_core::{MarketQuoteService, QuoteConfig};

    #[test]
    fn schema_declares_metal_with_default() {
        let definition = definition().expect("schema");
        assert_eq!(definition.name, "fetch_metal_price");

        let metal = &definition.input_schema["properties"]["metal"];
        assert_eq!(metal["type"], "string");
        assert_eq!(metal["default"], "gold");
        let required = definition.input_schema.get("required");
        assert!(required.map_or(true, |r| !r.to_string().contains("metal")));
    }

    #[test]
    fn blank_arguments_default_to_gold() {
        assert_eq!(FetchMetalPriceArgs::from_json("  ").expect("args").metal, "gold");
        assert_eq!(FetchMetalPriceArgs::from_json("{}").expect("args").metal, "gold");
        assert!(matches!(
            FetchMetalPriceArgs::from_json("[1]"),
            Err(ToolError::InvalidArguments(_))
        ));
    }

    #[tokio::test]
    async fn unknown_metal_lists_choices() {
        let service = MarketQuoteService::mock(QuoteConfig::default());
        let args = FetchMetalPriceArgs {
            metal: String::from("platinum"),
        };

        let error = invoke(&service, args).await.expect_err("must fail");
        assert_eq!(error.code(), "pricing.unknown_metal");
        assert_eq!(
            error.user_message(),
            "❌ Invalid metal type: 'platinum'\nPlease choose from: \"gold\", \"silver\""
        );
    }

    #[tokio::test]
    async fn mock_silver_report() {
        let service = MarketQuoteService::mock(QuoteConfig::default());
        let args = FetchMetalPriceArgs {
            metal: String::from(" Silver "),
        };

        let output = invoke(&service, args).await.expect("report");
        assert_eq!(output.report.metal, MetalKind::Silver);
        assert!(output.text.starts_with("🥈 Current Silver Price:"));
        assert!(output.text.contains("INR (Base): ₹2,075.00"));
        assert_eq!(output.source_chain, vec![ProviderId::Goldprice, ProviderId::Exchangerate]);
    }
}
