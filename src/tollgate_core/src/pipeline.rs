//! Locator -> decoder -> checks, as one request-to-result function.

use std::fmt;

use tracing::debug;

use crate::checks::Check;
use crate::domain::{payload::Payload, token_error::TokenError};
use crate::http_abstraction::AuthRequest;
use crate::locators::TokenLocator;
use crate::ports::decoder::TokenDecoder;

/// A composed token validation pipeline.
///
/// Each stage runs only when every earlier stage succeeded, and the first
/// failure is returned untouched. Checks run in the order they were added.
/// The pipeline holds no mutable state, so one instance can serve
/// concurrent requests.
pub struct Pipeline<D> {
    locator: Box<dyn TokenLocator>,
    decoder: D,
    checks: Vec<Box<dyn Check>>,
}

impl<D: TokenDecoder> Pipeline<D> {
    /// A pipeline with no checks: locate, then decode.
    pub fn new(locator: impl TokenLocator + 'static, decoder: D) -> Self {
        Self {
            locator: Box::new(locator),
            decoder,
            checks: Vec::new(),
        }
    }

    /// Append a check. It runs after every check added before it.
    pub fn check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn with_checks(mut self, checks: impl IntoIterator<Item = Box<dyn Check>>) -> Self {
        self.checks.extend(checks);
        self
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    #[tracing::instrument(name = "Pipeline::process", skip_all)]
    pub fn process(&self, request: &dyn AuthRequest) -> Result<Payload, TokenError> {
        self.locator
            .locate(request)
            .and_then(|raw_token| self.decoder.decode(Some(&raw_token)))
            .and_then(|payload| self.run_checks(payload))
            .inspect_err(|err| debug!(code = err.code(), error = %err, "token rejected"))
    }

    fn run_checks(&self, payload: Payload) -> Result<Payload, TokenError> {
        self.checks
            .iter()
            .try_fold(payload, |payload, check| check.check(payload))
    }

    /// Turn the pipeline into a plain `request -> Result` function.
    pub fn into_fn(self) -> impl Fn(&dyn AuthRequest) -> Result<Payload, TokenError> + Send + Sync {
        move |request: &dyn AuthRequest| self.process(request)
    }
}

impl<D: fmt::Debug> fmt::Debug for Pipeline<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("decoder", &self.decoder)
            .field("checks", &self.checks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::checks::{check_expiry, check_version, claim, numeric_claim, pass_through};
    use crate::http_abstraction::InMemoryRequest;
    use crate::locators::{from_cookie, from_header};

    /// Accepts tokens of the form `json:<object>` and nothing else.
    #[derive(Debug)]
    struct JsonDecoder;

    impl TokenDecoder for JsonDecoder {
        fn decode(&self, raw_token: Option<&str>) -> Result<Payload, TokenError> {
            let raw_token = raw_token.ok_or_else(|| TokenError::decode("missing token"))?;
            let body = raw_token
                .strip_prefix("json:")
                .ok_or_else(|| TokenError::decode("not a json token"))?;
            serde_json::from_str(body).map_err(|e| TokenError::decode(e.to_string()))
        }
    }

    fn bearer(payload: serde_json::Value) -> InMemoryRequest {
        InMemoryRequest::new().with_header("authorization", format!("Bearer json:{payload}"))
    }

    fn recording(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> impl Check + 'static {
        let log = log.clone();
        move |payload: Payload| -> Result<Payload, TokenError> {
            log.lock().unwrap().push(name);
            Ok(payload)
        }
    }

    #[test]
    fn test_zero_checks_is_locate_and_decode() {
        let pipeline = Pipeline::new(from_header, JsonDecoder);
        let result = pipeline.process(&bearer(json!({"foo": "bar"})));

        assert_eq!(result, Ok(Payload::new().with_claim("foo", "bar")));
        assert_eq!(pipeline.check_count(), 0);
    }

    #[test]
    fn test_locator_failure_short_circuits() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline =
            Pipeline::new(from_cookie("jwt"), JsonDecoder).check(recording(&calls, "a"));

        let result = pipeline.process(&bearer(json!({})));

        assert_eq!(result, Err(TokenError::Undefined));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_decode_failure_short_circuits() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(from_header, JsonDecoder).check(recording(&calls, "a"));

        let req = InMemoryRequest::new().with_header("authorization", "Bearer garbage");
        let result = pipeline.process(&req);

        assert_eq!(result, Err(TokenError::decode("not a json token")));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_checks_run_in_order_and_stop_at_first_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(from_header, JsonDecoder)
            .check(recording(&calls, "first"))
            .check(check_version(claim("version"), json!(1)))
            .check(recording(&calls, "after-version"))
            .check(check_expiry(numeric_claim("expiry"), || 20))
            .check(recording(&calls, "after-expiry"));

        let result = pipeline.process(&bearer(json!({"version": 1, "expiry": 10})));

        assert_eq!(result, Err(TokenError::Expiry { expiry: 10, now: 20 }));
        assert_eq!(*calls.lock().unwrap(), vec!["first", "after-version"]);
    }

    #[test]
    fn test_first_failure_wins() {
        let pipeline = Pipeline::new(from_header, JsonDecoder)
            .check(check_version(claim("version"), json!(1)))
            .check(check_expiry(numeric_claim("expiry"), || 20));

        let result = pipeline.process(&bearer(json!({"version": 2, "expiry": 10})));

        assert_eq!(
            result,
            Err(TokenError::Version {
                expected: json!(1),
                actual: json!(2)
            })
        );
    }

    #[test]
    fn test_all_checks_pass() {
        let pipeline = Pipeline::new(from_header, JsonDecoder).with_checks([
            Box::new(check_version(claim("version"), json!(1))) as Box<dyn Check>,
            Box::new(check_expiry(numeric_claim("expiry"), || 20)),
            Box::new(pass_through()),
        ]);

        let payload = pipeline
            .process(&bearer(json!({"foo": "bar", "version": 1, "expiry": 30})))
            .unwrap();

        assert_eq!(payload.claim("foo"), Some(&json!("bar")));
        assert_eq!(pipeline.check_count(), 3);
    }

    #[test]
    fn test_into_fn_behaves_like_process() {
        let process = Pipeline::new(from_header, JsonDecoder)
            .check(check_version(claim("version"), json!(1)))
            .into_fn();

        assert!(process(&bearer(json!({"version": 1}))).is_ok());
        assert!(process(&bearer(json!({"version": 3}))).is_err());
        assert_eq!(process(&InMemoryRequest::new()), Err(TokenError::Undefined));
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}

        let pipeline = Pipeline::new(from_header, JsonDecoder);
        assert_send_sync(&pipeline);
        assert_eq!(
            format!("{pipeline:?}"),
            "Pipeline { decoder: JsonDecoder, checks: 0, .. }"
        );
    }
}
