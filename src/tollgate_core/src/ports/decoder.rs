use crate::domain::{payload::Payload, token_error::TokenError};

// TokenDecoder port trait
//
// Implementations verify a raw token and turn it into a payload. A missing
// token (`None`) must fail with `TokenError::Decode` without reaching the
// verification primitive.
pub trait TokenDecoder: Send + Sync {
    fn decode(&self, raw_token: Option<&str>) -> Result<Payload, TokenError>;
}
