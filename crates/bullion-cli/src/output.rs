use bullion_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&output.envelope)?
            } else {
                serde_json::to_string(&output.envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(&output.envelope)?,
        OutputFormat::Text => render_text(output)?,
    }

    Ok(())
}

fn render_text(output: &CommandOutput) -> Result<(), CliError> {
    match &output.text {
        Some(text) => println!("{text}"),
        None => println!("{}", serde_json::to_string_pretty(&output.envelope.data)?),
    }

    for warning in &output.envelope.meta.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<(), CliError> {
    println!("request_id  : {}", envelope.meta.request_id);
    if let Some(trace_id) = &envelope.meta.trace_id {
        println!("trace_id    : {trace_id}");
    }
    println!("schema      : {}", envelope.meta.schema_version);
    println!("generated_at: {}", envelope.meta.generated_at);
    println!(
        "sources     : {}",
        envelope
            .meta
            .source_chain
            .iter()
            .map(|source| source.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );
    if let Some(origin) = envelope.meta.rate_origin {
        println!("rate_origin : {}", origin.as_str());
    }
    println!("latency_ms  : {}", envelope.meta.latency_ms);

    if !envelope.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    println!("data:");
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        println!("  {line}");
    }

    if !envelope.errors.is_empty() {
        println!("errors:");
        for error in &envelope.errors {
            println!("  - {}: {}", error.code, error.message);
        }
    }

    Ok(())
}
