use serde_json::Value;
use thiserror::Error;

/// Why a request's token was rejected.
///
/// The set is closed: locators, the decoder and every check report one of
/// these kinds. Values are never mutated after creation, so the first
/// failure of a pipeline run is reported exactly as it was produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenError {
    /// No candidate token string was found in the request.
    #[error("no token found in request")]
    Undefined,

    /// A token was found but failed signature verification or decoding.
    #[error("token could not be decoded: {cause}")]
    Decode { cause: String },

    /// The payload's version claim does not match the expected version.
    #[error("token version mismatch: expected {expected}, found {actual}")]
    Version { expected: Value, actual: Value },

    /// The payload's expiry claim is at or before the current time.
    #[error("token expired at {expiry} (now {now})")]
    Expiry { expiry: i64, now: i64 },
}

impl TokenError {
    pub fn decode(cause: impl Into<String>) -> Self {
        Self::Decode {
            cause: cause.into(),
        }
    }

    /// Stable machine-readable identifier for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Undefined => "token_undefined",
            TokenError::Decode { .. } => "token_decode",
            TokenError::Version { .. } => "token_version",
            TokenError::Expiry { .. } => "token_expiry",
        }
    }
}
