//! Response envelope around every machine-readable `bullion` output.
//!
//! Besides request bookkeeping, [`EnvelopeMeta`] records where the USD
//! conversion rate came from. A price computed with the configured fallback
//! rate is flagged in `rate_origin` and must also carry a warning, so a
//! consumer never mistakes it for a live quote.

use serde::{Deserialize, Serialize};

use crate::{ProviderId, RateOrigin, SourceError, UtcDateTime, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, data: T, errors: Vec<EnvelopeError>) -> Result<Self, ValidationError> {
        meta.validate()?;
        Ok(Self { meta, data, errors })
    }

    pub fn used_fallback_rate(&self) -> bool {
        self.meta.rate_origin == Some(RateOrigin::Fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    pub schema_version: String,
    pub generated_at: UtcDateTime,
    pub source_chain: Vec<ProviderId>,
    /// Absent when no rate was fetched (offline `calc`, failed lookups).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_origin: Option<RateOrigin>,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        if self.source_chain.is_empty() {
            return Err(ValidationError::EmptySourceChain);
        }

        let Some(origin) = self.rate_origin else {
            return Ok(());
        };
        if !self.source_chain.contains(&origin.provider()) {
            return Err(ValidationError::RateOriginWithoutSource { origin });
        }
        if origin == RateOrigin::Fallback && self.warnings.is_empty() {
            return Err(ValidationError::UnflaggedFallbackRate);
        }

        Ok(())
    }
}

/// Structured error payload for failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ProviderId>,
}

impl EnvelopeError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_owned(),
            message: message.into(),
            retryable: None,
            source: None,
        }
    }

    /// Upstream failure, attributed to goldprice when the adapter left no provider.
    pub fn from_source(error: &SourceError) -> Self {
        Self::new(error.code(), error.message())
            .with_retryable(error.retryable())
            .with_source(error.provider().unwrap_or(ProviderId::Goldprice))
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn with_source(mut self, source: ProviderId) -> Self {
        self.source = Some(source);
        self
    }
}

fn is_valid_schema_version(value: &str) -> bool {
    value
        .strip_prefix('v')
        .map(|version| version.split('.').collect::<Vec<_>>())
        .is_some_and(|parts| {
            parts.len() == 3
                && parts
                    .iter()
                    .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(source_chain: Vec<ProviderId>, rate_origin: Option<RateOrigin>) -> EnvelopeMeta {
        EnvelopeMeta {
            request_id: String::from("0b0e1a7c-5f44-4a36-9d51-4c6f0f8b2e11"),
            trace_id: None,
            schema_version: String::from("v1.0.0"),
            generated_at: UtcDateTime::now(),
            source_chain,
            rate_origin,
            latency_ms: 12,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn live_price_needs_the_exchange_rate_provider() {
        let live = meta(
            vec![ProviderId::Goldprice, ProviderId::Exchangerate],
            Some(RateOrigin::Live),
        );
        assert_eq!(live.validate(), Ok(()));

        let detached = meta(vec![ProviderId::Goldprice], Some(RateOrigin::Live));
        assert_eq!(
            detached.validate(),
            Err(ValidationError::RateOriginWithoutSource {
                origin: RateOrigin::Live
            })
        );
    }

    #[test]
    fn fallback_price_must_carry_a_warning() {
        let mut fallback = meta(
            vec![ProviderId::Goldprice, ProviderId::Fallback],
            Some(RateOrigin::Fallback),
        );
        assert_eq!(fallback.validate(), Err(ValidationError::UnflaggedFallbackRate));

        fallback.warnings.push(String::from("using fallback rate 83.00"));
        let envelope = Envelope::new(fallback, "silver", Vec::new()).expect("flagged fallback");
        assert!(envelope.used_fallback_rate());
    }

    #[test]
    fn offline_calculation_has_no_rate_origin() {
        let offline = meta(vec![ProviderId::Local], None);
        let envelope = Envelope::new(offline, (), Vec::new()).expect("valid");
        assert!(!envelope.used_fallback_rate());

        let json = serde_json::to_value(&envelope).expect("json");
        assert!(json["meta"].get("rate_origin").is_none());
    }

    #[test]
    fn rejects_malformed_schema_version_and_empty_chain() {
        let mut unversioned = meta(vec![ProviderId::Local], None);
        unversioned.schema_version = String::from("1.0");
        assert!(matches!(
            unversioned.validate(),
            Err(ValidationError::InvalidSchemaVersion { .. })
        ));

        assert_eq!(meta(Vec::new(), None).validate(), Err(ValidationError::EmptySourceChain));
    }

    #[test]
    fn source_errors_keep_their_provider_and_retry_hint() {
        let timeout = SourceError::unavailable("timed out after 10000 ms")
            .from_provider(ProviderId::Exchangerate);
        let error = EnvelopeError::from_source(&timeout);

        assert_eq!(error.code, "source.unavailable");
        assert_eq!(error.retryable, Some(true));
        assert_eq!(error.source, Some(ProviderId::Exchangerate));

        let anonymous = EnvelopeError::from_source(&SourceError::not_found("no silver"));
        assert_eq!(anonymous.source, Some(ProviderId::Goldprice));
    }
}
