//! # Envelope Construction and Validation
//!
//! [`EnvelopeBuilder`] assembles the `{ meta, data, errors }` document every
//! machine-readable `bullion` output is wrapped in. [`EnvelopeValidator`]
//! checks an already serialized document against the same constraints, which
//! is what consumers of the tool output rely on.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bullion_agent::envelope::EnvelopeBuilder;
//! use bullion_core::{ProviderId, RateOrigin};
//! use serde_json::json;
//!
//! let envelope = EnvelopeBuilder::new("v1.0.0")
//!     .with_source_chain(vec![ProviderId::Goldprice, ProviderId::Exchangerate])
//!     .with_rate_origin(RateOrigin::Live)
//!     .with_data(json!({ "metal": "gold" }))
//!     .with_latency_ms(142)
//!     .build()?;
//!
//! EnvelopeValidator::validate(&envelope)?;
//! ```

use bullion_core::{
    Envelope, EnvelopeError, EnvelopeMeta, ProviderId, RateOrigin, UtcDateTime, ValidationError,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::metadata::{is_valid_trace_id, RequestId, TraceId};

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Fluent builder for valid envelopes.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    schema_version: String,
    source_chain: Vec<ProviderId>,
    rate_origin: Option<RateOrigin>,
    data: Value,
    latency_ms: u64,
    warnings: Vec<String>,
    errors: Vec<EnvelopeError>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
}

impl EnvelopeBuilder {
    /// The schema version must follow `vMAJOR.MINOR.PATCH`.
    pub fn new(schema_version: impl Into<String>) -> Self {
        Self {
            schema_version: schema_version.into(),
            source_chain: Vec::new(),
            rate_origin: None,
            data: Value::Null,
            latency_ms: 0,
            warnings: Vec::new(),
            errors: Vec::new(),
            request_id: None,
            trace_id: None,
        }
    }

    pub fn with_source_chain(mut self, source_chain: Vec<ProviderId>) -> Self {
        self.source_chain = source_chain;
        self
    }

    pub fn with_rate_origin(mut self, rate_origin: RateOrigin) -> Self {
        self.rate_origin = Some(rate_origin);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }

    /// Defaults to a fresh UUID v4 when unset.
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn build(self) -> Result<Envelope<Value>, ValidationError> {
        let meta = EnvelopeMeta {
            request_id: self.request_id.unwrap_or_default().to_string(),
            trace_id: self.trace_id.map(|trace_id| trace_id.to_string()),
            schema_version: self.schema_version,
            generated_at: UtcDateTime::now(),
            source_chain: self.source_chain,
            rate_origin: self.rate_origin,
            latency_ms: self.latency_ms,
            warnings: self.warnings,
        };

        Envelope::new(meta, self.data, self.errors)
    }
}

/// Structural checks over a serialized envelope.
pub struct EnvelopeValidator;

impl EnvelopeValidator {
    pub fn validate<T: Serialize>(envelope: &Envelope<T>) -> Result<(), SchemaValidationError> {
        let value = serde_json::to_value(envelope)?;
        Self::validate_value(&value)
    }

    pub fn validate_value(value: &Value) -> Result<(), SchemaValidationError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaValidationError::invalid_type("root", "object"))?;

        let meta = obj
            .get("meta")
            .ok_or_else(|| SchemaValidationError::missing_field("meta"))?
            .as_object()
            .ok_or_else(|| SchemaValidationError::invalid_type("meta", "object"))?;
        Self::validate_meta(meta)?;

        if !obj.contains_key("data") {
            return Err(SchemaValidationError::missing_field("data"));
        }

        if let Some(errors) = obj.get("errors") {
            let errors = errors
                .as_array()
                .ok_or_else(|| SchemaValidationError::invalid_type("errors", "array"))?;
            for error in errors {
                Self::validate_error(error)?;
            }
        }

        Ok(())
    }

    fn validate_meta(meta: &Map<String, Value>) -> Result<(), SchemaValidationError> {
        let request_id = required_str(meta, "meta.request_id", "request_id")?;
        if request_id.len() < 8 {
            return Err(SchemaValidationError::constraint_violation(
                "meta.request_id",
                "must be at least 8 characters",
            ));
        }

        let schema_version = required_str(meta, "meta.schema_version", "schema_version")?;
        if !is_valid_schema_version(schema_version) {
            return Err(SchemaValidationError::constraint_violation(
                "meta.schema_version",
                "must match vMAJOR.MINOR.PATCH",
            ));
        }

        required_str(meta, "meta.generated_at", "generated_at")?;

        let source_chain = meta
            .get("source_chain")
            .ok_or_else(|| SchemaValidationError::missing_field("meta.source_chain"))?
            .as_array()
            .ok_or_else(|| SchemaValidationError::invalid_type("meta.source_chain", "array"))?;
        if source_chain.is_empty() {
            return Err(SchemaValidationError::constraint_violation(
                "meta.source_chain",
                "must contain at least one source",
            ));
        }
        let mut providers = Vec::with_capacity(source_chain.len());
        for source in source_chain {
            let provider = source
                .as_str()
                .and_then(|id| id.parse::<ProviderId>().ok())
                .ok_or_else(|| {
                    SchemaValidationError::constraint_violation(
                        "meta.source_chain",
                        "entries must be known provider ids",
                    )
                })?;
            providers.push(provider);
        }

        if let Some(origin) = meta.get("rate_origin") {
            let origin = serde_json::from_value::<RateOrigin>(origin.clone()).map_err(|_| {
                SchemaValidationError::invalid_type("meta.rate_origin", "\"live\" or \"fallback\"")
            })?;
            if !providers.contains(&origin.provider()) {
                return Err(SchemaValidationError::constraint_violation(
                    "meta.rate_origin",
                    "must match a provider in source_chain",
                ));
            }
            let warned = meta
                .get("warnings")
                .and_then(Value::as_array)
                .is_some_and(|warnings| !warnings.is_empty());
            if origin == RateOrigin::Fallback && !warned {
                return Err(SchemaValidationError::constraint_violation(
                    "meta.warnings",
                    "a fallback rate must be explained by a warning",
                ));
            }
        }

        let latency_ms = meta
            .get("latency_ms")
            .ok_or_else(|| SchemaValidationError::missing_field("meta.latency_ms"))?;
        if !latency_ms.is_u64() {
            return Err(SchemaValidationError::invalid_type(
                "meta.latency_ms",
                "non-negative integer",
            ));
        }

        if let Some(warnings) = meta.get("warnings") {
            let all_strings = warnings
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            if !all_strings {
                return Err(SchemaValidationError::invalid_type(
                    "meta.warnings",
                    "array of strings",
                ));
            }
        }

        if let Some(trace_id) = meta.get("trace_id") {
            let trace_id = trace_id
                .as_str()
                .ok_or_else(|| SchemaValidationError::invalid_type("meta.trace_id", "string"))?;
            if !is_valid_trace_id(trace_id) {
                return Err(SchemaValidationError::constraint_violation(
                    "meta.trace_id",
                    "must be 32 hex characters",
                ));
            }
        }

        Ok(())
    }

    fn validate_error(error: &Value) -> Result<(), SchemaValidationError> {
        let obj = error
            .as_object()
            .ok_or_else(|| SchemaValidationError::invalid_type("error", "object"))?;

        for (path, key) in [("error.code", "code"), ("error.message", "message")] {
            if required_str(obj, path, key)?.trim().is_empty() {
                return Err(SchemaValidationError::constraint_violation(
                    path,
                    "must not be empty",
                ));
            }
        }

        Ok(())
    }
}

fn required_str<'v>(
    obj: &'v Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'v str, SchemaValidationError> {
    obj.get(key)
        .ok_or_else(|| SchemaValidationError::missing_field(path))?
        .as_str()
        .ok_or_else(|| SchemaValidationError::invalid_type(path, "string"))
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };
    let parts = version.split('.').collect::<Vec<_>>();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid type for {field}: expected {expected}")]
    InvalidType { field: String, expected: String },

    #[error("constraint violation at {field}: {message}")]
    ConstraintViolation { field: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SchemaValidationError {
    fn missing_field(field: &str) -> Self {
        Self::MissingField(field.to_string())
    }

    fn invalid_type(field: &str, expected: &str) -> Self {
        Self::InvalidType {
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    fn constraint_violation(field: &str, message: &str) -> Self {
        Self::ConstraintViolation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for SchemaValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
