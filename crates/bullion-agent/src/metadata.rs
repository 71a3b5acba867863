//! Request identifiers carried in envelope metadata.
//!
//! - [`RequestId`]: UUID v4 request identifier
//! - [`TraceId`]: W3C-style 32-character hex trace identifier

use std::fmt::{self, Display, Formatter};

use bullion_core::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request identifier (UUID v4) stamped on every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|_| ValidationError::InvalidRequestId)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new_v4()
    }
}

/// Trace identifier: 32 lowercase hex characters, not all zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    /// Random trace id drawn from UUID v4 bytes.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn new_checked(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_valid_trace_id(&value) {
            return Err(ValidationError::InvalidTraceId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TraceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_valid_trace_id(value: &str) -> bool {
    value.len() == 32
        && value.chars().all(|ch| ch.is_ascii_hexdigit())
        && value.chars().any(|ch| ch != '0')
}
