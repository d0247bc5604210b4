//! Token locators: find a raw token string inside a request.
//!
//! Locators only look. They know nothing about how the token will be
//! validated and never touch the request beyond reading headers.

use crate::domain::token_error::TokenError;
use crate::http_abstraction::AuthRequest;

const BEARER_PREFIX: &str = "Bearer ";

/// Something that can find a raw token in a request.
///
/// Implemented for every `Fn(&dyn AuthRequest) -> Result<String, TokenError>`,
/// so plain functions and closures (including the ones returned by
/// [`from_cookie`] and [`from_anywhere`]) are locators.
pub trait TokenLocator: Send + Sync {
    fn locate(&self, request: &dyn AuthRequest) -> Result<String, TokenError>;
}

impl<F> TokenLocator for F
where
    F: Fn(&dyn AuthRequest) -> Result<String, TokenError> + Send + Sync,
{
    fn locate(&self, request: &dyn AuthRequest) -> Result<String, TokenError> {
        self(request)
    }
}

/// Read the token from the `authorization` header.
///
/// A `Bearer ` prefix (case-sensitive, single space) is stripped. A header
/// without that prefix is taken verbatim as the token.
pub fn from_header(request: &dyn AuthRequest) -> Result<String, TokenError> {
    let value = request.header("authorization").ok_or(TokenError::Undefined)?;

    Ok(value.strip_prefix(BEARER_PREFIX).unwrap_or(value).to_owned())
}

/// Read the token from the cookie called `cookie_name`.
pub fn from_cookie(
    cookie_name: &str,
) -> impl Fn(&dyn AuthRequest) -> Result<String, TokenError> + Clone + Send + Sync + use<> {
    let cookie_name = cookie_name.to_owned();

    move |request: &dyn AuthRequest| {
        request
            .cookie(&cookie_name)
            .map(str::to_owned)
            .ok_or(TokenError::Undefined)
    }
}

/// Try the cookie first, then fall back to the `authorization` header.
///
/// When both attempts fail the header attempt's failure is returned.
pub fn from_anywhere(
    cookie_name: &str,
) -> impl Fn(&dyn AuthRequest) -> Result<String, TokenError> + Clone + Send + Sync + use<> {
    let by_cookie = from_cookie(cookie_name);

    move |request: &dyn AuthRequest| by_cookie(request).or_else(|_| from_header(request))
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::http_abstraction::InMemoryRequest;

    fn with_auth(value: &str) -> InMemoryRequest {
        InMemoryRequest::new().with_header("authorization", value)
    }

    fn with_cookie(value: &str) -> InMemoryRequest {
        InMemoryRequest::new().with_header("cookie", value)
    }

    #[test]
    fn test_from_header_strips_bearer() {
        assert_eq!(from_header(&with_auth("Bearer X")), Ok("X".to_string()));
    }

    #[test]
    fn test_from_header_without_scheme_is_verbatim() {
        assert_eq!(from_header(&with_auth("X")), Ok("X".to_string()));
        assert_eq!(
            from_header(&with_auth("bearer X")),
            Ok("bearer X".to_string())
        );
        assert_eq!(
            from_header(&with_auth("Bearer  X")),
            Ok(" X".to_string())
        );
    }

    #[test]
    fn test_from_header_missing() {
        assert_eq!(
            from_header(&InMemoryRequest::new()),
            Err(TokenError::Undefined)
        );
    }

    #[test]
    fn test_from_header_is_case_insensitive_on_name() {
        let req = InMemoryRequest::new().with_header("Authorization", "Bearer X");
        assert_eq!(from_header(&req), Ok("X".to_string()));
    }

    #[test]
    fn test_from_cookie_finds_named_cookie() {
        let locate = from_cookie("jwt");
        assert_eq!(locate(&with_cookie("foo=bar; jwt=X")), Ok("X".to_string()));
    }

    #[test]
    fn test_from_cookie_missing_cookie() {
        let locate = from_cookie("jwt");
        assert_eq!(locate(&with_cookie("foo=bar")), Err(TokenError::Undefined));
        assert_eq!(locate(&InMemoryRequest::new()), Err(TokenError::Undefined));
    }

    #[test]
    fn test_from_cookie_ignores_authorization_header() {
        let locate = from_cookie("jwt");
        assert_eq!(locate(&with_auth("Bearer X")), Err(TokenError::Undefined));
    }

    #[test]
    fn test_from_anywhere_prefers_cookie() {
        let req = InMemoryRequest::new()
            .with_header("cookie", "jwt=from-cookie")
            .with_header("authorization", "Bearer from-header");

        assert_eq!(from_anywhere("jwt")(&req), Ok("from-cookie".to_string()));
    }

    #[test]
    fn test_from_anywhere_falls_back_to_header() {
        let req = with_auth("Bearer from-header");
        assert_eq!(from_anywhere("jwt")(&req), Ok("from-header".to_string()));

        let req = InMemoryRequest::new()
            .with_header("cookie", "other=1")
            .with_header("authorization", "from-header");
        assert_eq!(from_anywhere("jwt")(&req), Ok("from-header".to_string()));
    }

    #[test]
    fn test_from_anywhere_fails_when_both_absent() {
        assert_eq!(
            from_anywhere("jwt")(&InMemoryRequest::new()),
            Err(TokenError::Undefined)
        );
    }

    #[test]
    fn test_locators_are_usable_as_trait_objects() {
        let locators: Vec<Box<dyn TokenLocator>> = vec![
            Box::new(from_header),
            Box::new(from_cookie("jwt")),
            Box::new(from_anywhere("jwt")),
        ];
        let req = InMemoryRequest::new()
            .with_header("cookie", "jwt=c")
            .with_header("authorization", "Bearer h");

        let found: Vec<_> = locators.iter().map(|l| l.locate(&req)).collect();
        assert_eq!(
            found,
            vec![Ok("h".to_string()), Ok("c".to_string()), Ok("c".to_string())]
        );
    }

    #[quickcheck]
    fn prop_bearer_prefix_is_stripped(token: String) -> bool {
        let req = with_auth(&format!("Bearer {token}"));
        from_header(&req) == Ok(token)
    }

    #[quickcheck]
    fn prop_locators_are_idempotent(cookie: String, auth: String) -> bool {
        let req = InMemoryRequest::new()
            .with_header("cookie", cookie)
            .with_header("authorization", auth);
        let anywhere = from_anywhere("jwt");

        from_header(&req) == from_header(&req) && anywhere(&req) == anywhere(&req)
    }
}
