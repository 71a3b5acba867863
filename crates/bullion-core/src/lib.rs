//! # Bullion Core
//!
//! Precious-metal price computation and the quote plumbing around it.
//!
//! ## Overview
//!
//! - **Pure calculator** turning a USD spot price and a conversion rate into
//!   taxed per-ounce and per-10-gram breakdowns
//! - **Closed metal set** with per-metal import duty
//! - **Quote service** seam over upstream spot and exchange-rate adapters,
//!   with fallback-rate substitution that is reported, not hidden
//! - **Response envelope** with metadata, rate provenance and structured errors
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | goldprice.org and exchangerate-api.com adapters |
//! | [`calculator`] | Pure price and ratio computation |
//! | [`data_source`] | Upstream source traits and `SourceError` |
//! | [`domain`] | Metals, tax policy, raw quotes, timestamps |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Validation and pricing errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`quote_service`] | `QuoteService` trait and live implementation |
//! | [`report`] | Rounding and text rendering |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust
//! use bullion_core::{compute_breakdown, MetalKind};
//!
//! let pair = compute_breakdown(MetalKind::Gold, 2000.0, 83.0)?;
//! assert!((pair.per_ounce.local_total_with_tax - 180_940.0).abs() < 1e-6);
//! # Ok::<(), bullion_core::PricingError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Tool     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Quote Service  │────▶│ Spot / FX        │
//! │  (fallback rate)│     │ adapters + HTTP  │
//! └────────┬────────┘     └──────────────────┘
//!          │ RawQuote
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Calculator     │────▶│ Report           │
//! │  (pure)         │     │ (rounding, text) │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod calculator;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod quote_service;
pub mod report;
pub mod source;

pub use adapters::{ExchangeRateAdapter, GoldpriceAdapter};

pub use calculator::{compute_breakdown, compute_quote, gold_silver_ratio, BreakdownPair, PriceBreakdown};

pub use data_source::{
    ExchangeRateSource, SourceError, SourceErrorKind, SpotPriceSource, SpotSnapshot,
};

pub use domain::{
    validate_currency_code, MetalKind, RateOrigin, RawQuote, SourcedQuote, TaxPolicy,
    UtcDateTime, GRAMS_PER_OUNCE, GST_RATE,
};

pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};

pub use error::{PricingError, ValidationError};

pub use http_client::{
    CannedHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use quote_service::{MarketQuoteService, QuoteBatch, QuoteConfig, QuoteService};

pub use report::{PriceReport, RatioReport};

pub use source::ProviderId;
