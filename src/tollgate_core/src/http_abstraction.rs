//! Framework-agnostic view of an incoming HTTP request.
//!
//! Token location only ever needs two headers (`authorization` and
//! `cookie`), so the abstraction is little more than header lookup. Frameworks
//! implement it on newtype wrappers of their own request types:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  tollgate_core: AuthRequest trait        │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  tollgate_adapters: RequestHeaders       │
//! │  tollgate_axum: AxumRequest              │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  Locators read `&dyn AuthRequest`        │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! pub struct AxumRequest(pub axum::extract::Request);
//!
//! impl AuthRequest for AxumRequest {
//!     fn header(&self, name: &str) -> Option<&str> {
//!         self.0.headers().get(name)?.to_str().ok()
//!     }
//! }
//! ```

/// Trait for HTTP requests that tokens can be located in.
///
/// # Implementation Notes
///
/// - Return `&str` references directly from the framework's data structures
/// - Header lookup must be case-insensitive (per HTTP spec)
/// - Implementations must not mutate anything on lookup
pub trait AuthRequest {
    /// Get a header value by name.
    ///
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get every value of a header, in the order they were received.
    ///
    /// Only needed for headers that may legitimately repeat, such as
    /// `cookie` over HTTP/2. The default yields the single [`header`] value.
    ///
    /// [`header`]: AuthRequest::header
    fn header_values(&self, name: &str) -> Vec<&str> {
        self.header(name).into_iter().collect()
    }

    /// Get a cookie value by name.
    ///
    /// Every `cookie` header is split on `;`, each segment is trimmed and
    /// split on its first `=`. The first segment whose key equals `name` wins.
    fn cookie(&self, name: &str) -> Option<&str> {
        self.header_values("cookie")
            .into_iter()
            .flat_map(|cookie_header| cookie_header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Owned, in-memory request holding nothing but headers.
///
/// Useful for tests and for callers that already extracted headers from
/// some other transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryRequest {
    headers: Vec<(String, String)>,
}

impl InMemoryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl<K, V> FromIterator<(K, V)> for InMemoryRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            headers: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl AuthRequest for InMemoryRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}
