//! `AuthRequest` for anything built on the `http` crate.
//!
//! `http::HeaderMap` already does case-insensitive lookup, so the wrapper
//! only has to borrow the map and hand out `&str` views of its values.

use http::{HeaderMap, request::Parts};
use tollgate_core::AuthRequest;

/// Borrowed view of a request's headers.
///
/// Works for `http::Request<B>`, `http::request::Parts`, or a bare
/// `HeaderMap`, which covers hyper, axum, tonic and friends.
#[derive(Debug, Clone, Copy)]
pub struct RequestHeaders<'a>(pub &'a HeaderMap);

impl<'a> From<&'a HeaderMap> for RequestHeaders<'a> {
    fn from(headers: &'a HeaderMap) -> Self {
        RequestHeaders(headers)
    }
}

impl<'a> From<&'a Parts> for RequestHeaders<'a> {
    fn from(parts: &'a Parts) -> Self {
        RequestHeaders(&parts.headers)
    }
}

impl<'a, B> From<&'a http::Request<B>> for RequestHeaders<'a> {
    fn from(request: &'a http::Request<B>) -> Self {
        RequestHeaders(request.headers())
    }
}

impl AuthRequest for RequestHeaders<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.get(name)?.to_str().ok()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        self.0
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }
}
