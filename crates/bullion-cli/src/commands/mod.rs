mod calc;
pub mod menu;
mod price;
mod ratio;
mod tool;

use std::time::Instant;

use bullion_agent::{EnvelopeBuilder, ToolError, TraceId, SCHEMA_VERSION};
use bullion_core::{
    validate_currency_code, Envelope, EnvelopeError, MarketQuoteService, ProviderId, QuoteConfig,
    RateOrigin, SourceError,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command, ToolCommand};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub text: Option<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub source_chain: Vec<ProviderId>,
    pub rate_origin: Option<RateOrigin>,
}

impl CommandResult {
    pub fn ok(data: Value, source_chain: Vec<ProviderId>) -> Self {
        Self {
            data,
            text: None,
            warnings: Vec::new(),
            errors: Vec::new(),
            source_chain,
            rate_origin: None,
        }
    }

    pub fn with_rate_origin(mut self, rate_origin: RateOrigin) -> Self {
        self.rate_origin = Some(rate_origin);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Envelope plus the human rendering used by `--format text`.
pub struct CommandOutput {
    pub envelope: Envelope<Value>,
    pub text: Option<String>,
}

pub fn quote_service(cli: &Cli) -> Result<MarketQuoteService, CliError> {
    let config = QuoteConfig::new(&cli.currency, cli.fallback_rate, cli.timeout_ms)?;
    Ok(if cli.mock {
        MarketQuoteService::mock(config)
    } else {
        MarketQuoteService::live(config)
    })
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Price(args) => price::run(args, &quote_service(cli)?).await?,
        Command::Ratio => ratio::run(&quote_service(cli)?).await?,
        Command::Calc(args) => calc::run(args, &validate_currency_code(&cli.currency)?)?,
        Command::Tool(args) => match &args.command {
            ToolCommand::Schema => tool::schema()?,
            ToolCommand::Call(call) => tool::call(call, &quote_service(cli)?).await?,
        },
        Command::Menu => {
            return Err(CliError::Command(String::from(
                "menu is interactive and produces no envelope",
            )))
        }
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    into_output(command_result, latency_ms)
}

fn into_output(command_result: CommandResult, latency_ms: u64) -> Result<CommandOutput, CliError> {
    let CommandResult {
        data,
        text,
        warnings,
        errors,
        source_chain,
        rate_origin,
    } = command_result;

    debug!(
        latency_ms,
        errors = errors.len(),
        warnings = warnings.len(),
        fallback_rate = rate_origin == Some(RateOrigin::Fallback),
        "command finished"
    );
    let mut builder = EnvelopeBuilder::new(SCHEMA_VERSION)
        .with_trace_id(TraceId::new())
        .with_source_chain(source_chain)
        .with_data(data)
        .with_latency_ms(latency_ms)
        .with_warnings(warnings);
    if let Some(rate_origin) = rate_origin {
        builder = builder.with_rate_origin(rate_origin);
    }
    for error in errors {
        builder = builder.with_error(error);
    }

    Ok(CommandOutput {
        envelope: builder.build()?,
        text,
    })
}

/// Result for a command whose upstream fetch failed.
pub(crate) fn source_failure(
    error: &SourceError,
    text: impl Into<String>,
) -> Result<CommandResult, CliError> {
    let envelope_error = EnvelopeError::from_source(error);
    let source = envelope_error.source.unwrap_or(ProviderId::Goldprice);

    Ok(CommandResult::ok(Value::Null, vec![source])
        .with_error(envelope_error)
        .with_text(text))
}

pub(crate) fn tool_failure(error: &ToolError, data: Value) -> Result<CommandResult, CliError> {
    let source = error.provider().unwrap_or(ProviderId::Local);
    let mut envelope_error =
        EnvelopeError::new(error.code(), error.to_string()).with_retryable(error.retryable());
    if error.provider().is_some() {
        envelope_error = envelope_error.with_source(source);
    }

    Ok(CommandResult::ok(data, vec![source])
        .with_error(envelope_error)
        .with_text(error.user_message()))
}
