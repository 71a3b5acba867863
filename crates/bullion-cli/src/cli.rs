//! CLI argument definitions for bullion.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `price` | Fetch and price one metal |
//! | `ratio` | Gold/silver ratio with both breakdowns |
//! | `calc` | Price caller-supplied spot and rate, offline |
//! | `menu` | Interactive price checker |
//! | `tool` | Inspect or call the `fetch_metal_price` tool |
//!
//! # Global Options
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--format` | | `json` |
//! | `--pretty` | | `false` |
//! | `--mock` | | `false` |
//! | `--currency` | `BULLION_CURRENCY` | `INR` |
//! | `--fallback-rate` | `BULLION_FALLBACK_RATE` | `83.0` |
//! | `--timeout-ms` | `BULLION_TIMEOUT_MS` | `10000` |
//!
//! # Examples
//!
//! ```bash
//! bullion price silver --format text
//! bullion calc gold --spot 2000 --rate 83 --pretty
//! bullion tool call --args '{"metal":"gold"}'
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "bullion",
    author,
    version,
    about = "Gold and silver prices with GST and import duty",
    long_about = "bullion fetches the USD spot price of gold or silver, converts it into a local \
currency and adds GST and the metal's import duty, per troy ounce and per 10 grams.\n\
\n\
Use 'bullion <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: envelope with metadata (default)
    /// - table: envelope metadata followed by the data
    /// - text: human-readable report only
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve fixed offline upstream data instead of calling the network.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// ISO-4217 currency prices are converted into.
    #[arg(long, global = true, env = "BULLION_CURRENCY", default_value = "INR")]
    pub currency: String,

    /// Units of currency per USD used when the live rate is unavailable.
    #[arg(long, global = true, env = "BULLION_FALLBACK_RATE", default_value_t = 83.0)]
    pub fallback_rate: f64,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true, env = "BULLION_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Log upstream traffic to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Text,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current price of a metal.
    Price(PriceArgs),
    /// Gold/silver ratio from a single spot snapshot.
    Ratio,
    /// Price a caller-supplied spot and conversion rate without network access.
    Calc(CalcArgs),
    /// Interactive menu: gold, silver, ratio, exit.
    Menu,
    /// Agent tool surface.
    Tool(ToolArgs),
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Metal to price: gold or silver.
    #[arg(default_value = "gold")]
    pub metal: String,
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Metal to price: gold or silver.
    pub metal: String,

    /// Spot price in USD per troy ounce.
    #[arg(long)]
    pub spot: f64,

    /// Units of the configured currency per USD.
    #[arg(long)]
    pub rate: f64,
}

#[derive(Debug, Args)]
pub struct ToolArgs {
    #[command(subcommand)]
    pub command: ToolCommand,
}

#[derive(Debug, Subcommand)]
pub enum ToolCommand {
    /// Print the tool declaration and input schema.
    Schema,
    /// Invoke the tool with JSON arguments.
    Call(ToolCallArgs),
}

#[derive(Debug, Args)]
pub struct ToolCallArgs {
    /// JSON argument object; read from stdin when omitted.
    #[arg(long)]
    pub args: Option<String>,
}
