use bullion_agent::tool::{invoke, FetchMetalPriceArgs, ToolError};
use bullion_core::{MetalKind, QuoteService};

use crate::cli::PriceArgs;
use crate::error::CliError;

use super::{source_failure, CommandResult};

pub async fn run(args: &PriceArgs, service: &dyn QuoteService) -> Result<CommandResult, CliError> {
    let metal = args.metal.parse::<MetalKind>()?;
    let request = FetchMetalPriceArgs {
        metal: metal.label().to_string(),
    };

    match invoke(service, request).await {
        Ok(output) => Ok(
            CommandResult::ok(serde_json::to_value(&output.report)?, output.source_chain)
                .with_rate_origin(output.report.rate_origin)
                .with_text(output.text)
                .with_warnings(output.warnings),
        ),
        Err(error) => {
            let text = error.user_message();
            match error {
                ToolError::Pricing(error) => Err(error.into()),
                ToolError::InvalidArguments(detail) => Err(CliError::Command(detail)),
                ToolError::Upstream { source, .. } => source_failure(&source, text),
            }
        }
    }
}
