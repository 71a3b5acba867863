//! # bullion-agent
//!
//! Agent-facing primitives for bullion: JSON envelopes, request metadata, and
//! the `fetch_metal_price` tool boundary.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`envelope`] | Envelope construction and validation |
//! | [`metadata`] | Request tracking with request_id and trace_id |
//! | [`tool`] | Tool schema, invocation, and error translation |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bullion_agent::tool::{self, FetchMetalPriceArgs};
//! use bullion_core::{MarketQuoteService, QuoteConfig};
//!
//! let service = MarketQuoteService::mock(QuoteConfig::default());
//! let output = tool::invoke(&service, FetchMetalPriceArgs::default()).await?;
//! println!("{}", output.text);
//! ```

pub mod envelope;
pub mod metadata;
pub mod tool;

pub use envelope::{EnvelopeBuilder, EnvelopeValidator, SchemaValidationError, SCHEMA_VERSION};
pub use metadata::{RequestId, TraceId};
pub use tool::{FetchMetalPriceArgs, ToolDefinition, ToolError, ToolOutput, TOOL_NAME};
