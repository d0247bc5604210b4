//! Payload checks and the factories that build them.
//!
//! A check takes a decoded [`Payload`] and either hands it back unchanged or
//! replaces it with a [`TokenError`]. Claim checks are opt-in per token: a
//! payload that does not carry the claim passes.

use chrono::Utc;
use serde_json::Value;

use crate::domain::payload::Payload;
use crate::domain::token_error::TokenError;

/// A single validation step over a decoded payload.
///
/// Implemented for every `Fn(Payload) -> Result<Payload, TokenError>`, so the
/// closures returned by the factories below, as well as caller-defined
/// closures, plug into a pipeline directly.
pub trait Check: Send + Sync {
    fn check(&self, payload: Payload) -> Result<Payload, TokenError>;
}

impl<F> Check for F
where
    F: Fn(Payload) -> Result<Payload, TokenError> + Send + Sync,
{
    fn check(&self, payload: Payload) -> Result<Payload, TokenError> {
        self(payload)
    }
}

/// The identity check. Use it to switch a category of validation off
/// without changing the shape of a pipeline.
pub fn pass_through() -> impl Fn(Payload) -> Result<Payload, TokenError> + Clone + Send + Sync {
    Ok::<Payload, TokenError>
}

/// Fail with [`TokenError::Version`] when the extracted version differs from
/// `expected`.
///
/// Values compare as JSON. Two numbers are equal when their numeric values
/// are, so `1` matches `1.0`, while `1` and `"1"` never match.
pub fn check_version<E, V>(
    extractor: E,
    expected: V,
) -> impl Fn(Payload) -> Result<Payload, TokenError> + Clone + Send + Sync
where
    E: Fn(&Payload) -> Option<V> + Clone + Send + Sync,
    V: Into<Value> + Clone + Send + Sync,
{
    move |payload: Payload| {
        let Some(actual) = extractor(&payload) else {
            return Ok(payload);
        };

        let actual: Value = actual.into();
        let expected: Value = expected.clone().into();
        if versions_match(&actual, &expected) {
            Ok(payload)
        } else {
            Err(TokenError::Version { expected, actual })
        }
    }
}

fn versions_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (a.as_u64(), b.as_u64()) {
                (Some(a), Some(b)) => a == b,
                _ => a.as_f64() == b.as_f64(),
            },
        },
        _ => actual == expected,
    }
}

/// Fail with [`TokenError::Expiry`] once `now()` reaches the extracted
/// expiry. The comparison is strict: a token is still valid while
/// `now < expiry`.
///
/// `now` is only consulted when the payload carries an expiry.
pub fn check_expiry<E, N>(
    extractor: E,
    now: N,
) -> impl Fn(Payload) -> Result<Payload, TokenError> + Clone + Send + Sync
where
    E: Fn(&Payload) -> Option<i64> + Clone + Send + Sync,
    N: Fn() -> i64 + Clone + Send + Sync,
{
    move |payload: Payload| {
        let Some(expiry) = extractor(&payload) else {
            return Ok(payload);
        };

        let now = now();
        if now < expiry {
            Ok(payload)
        } else {
            Err(TokenError::Expiry { expiry, now })
        }
    }
}

/// Extract a claim by name as a raw JSON value.
pub fn claim(name: &str) -> impl Fn(&Payload) -> Option<Value> + Clone + Send + Sync + use<> {
    let name = name.to_owned();
    move |payload: &Payload| payload.claim(&name).cloned()
}

/// Extract an integral claim by name.
///
/// Fractional numbers are rounded up, so `now < expiry` keeps its meaning
/// against an integer clock. Non-numeric values count as absent.
pub fn numeric_claim(name: &str) -> impl Fn(&Payload) -> Option<i64> + Clone + Send + Sync + use<> {
    let name = name.to_owned();
    move |payload: &Payload| {
        let value = payload.claim(&name)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|secs| secs.ceil() as i64))
    }
}

/// Current time in seconds since the Unix epoch.
pub fn system_now() -> i64 {
    Utc::now().timestamp()
}
