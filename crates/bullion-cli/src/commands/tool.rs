use std::io;

use bullion_agent::tool::{definition, invoke, FetchMetalPriceArgs};
use bullion_core::{ProviderId, QuoteService};
use serde_json::json;

use crate::cli::ToolCallArgs;
use crate::error::CliError;

use super::{tool_failure, CommandResult};

pub fn schema() -> Result<CommandResult, CliError> {
    let definition = serde_json::to_value(definition()?)?;
    let text = serde_json::to_string_pretty(&definition)?;
    Ok(CommandResult::ok(definition, vec![ProviderId::Local]).with_text(text))
}

pub async fn call(args: &ToolCallArgs, service: &dyn QuoteService) -> Result<CommandResult, CliError> {
    let raw = match &args.args {
        Some(raw) => raw.clone(),
        None => io::read_to_string(io::stdin())?,
    };

    let outcome = match FetchMetalPriceArgs::from_json(&raw) {
        Ok(request) => invoke(service, request).await,
        Err(error) => Err(error),
    };

    match outcome {
        Ok(output) => {
            let data = json!({
                "content": output.text,
                "is_error": false,
                "report": output.report,
            });
            Ok(CommandResult::ok(data, output.source_chain)
                .with_rate_origin(output.report.rate_origin)
                .with_text(output.text)
                .with_warnings(output.warnings))
        }
        Err(error) => {
            let data = json!({
                "content": error.user_message(),
                "is_error": true,
            });
            tool_failure(&error, data)
        }
    }
}
