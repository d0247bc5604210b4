use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::{ExposeSecret, Secret};
use tollgate_core::{Check, Payload, Pipeline, TokenDecoder, TokenError, TokenLocator};

const MISSING_TOKEN: &str = "token is missing";

/// HMAC-signed JWT decoder.
///
/// Accepts HS256, HS384 and HS512. Registered claims are validated only
/// when present: an `exp` in the past is rejected, but no claim is
/// required, and `aud` is ignored unless an audience is configured.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    pub fn new(secret: &Secret<String>) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Require the `aud` claim to contain one of `audience`.
    pub fn with_audience(mut self, audience: &[&str]) -> Self {
        self.validation.set_audience(audience);
        self.validation.validate_aud = true;
        self
    }

    /// Clock skew tolerated on the registered `exp`/`nbf` claims, in seconds.
    pub fn with_leeway(mut self, leeway_seconds: u64) -> Self {
        self.validation.leeway = leeway_seconds;
        self
    }
}

impl TokenDecoder for JwtDecoder {
    #[tracing::instrument(name = "JwtDecoder::decode", skip_all)]
    fn decode(&self, raw_token: Option<&str>) -> Result<Payload, TokenError> {
        // Never hand a missing token to jsonwebtoken.
        let raw_token = raw_token.ok_or_else(|| TokenError::decode(MISSING_TOKEN))?;

        decode::<Payload>(raw_token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::decode(e.to_string()))
    }
}

/// Build a decoder bound to `secret`.
pub fn decode_token(secret: impl Into<String>) -> JwtDecoder {
    JwtDecoder::new(&Secret::new(secret.into()))
}

/// Compose `locator`, a decoder bound to `secret`, and `checks` into one
/// pipeline. Checks run in iteration order.
pub fn process_request_token(
    locator: impl TokenLocator + 'static,
    secret: impl Into<String>,
    checks: impl IntoIterator<Item = Box<dyn Check>>,
) -> Pipeline<JwtDecoder> {
    Pipeline::new(locator, decode_token(secret)).with_checks(checks)
}
