//! Axum framework adapter for token location.
//!
//! The `AuthRequest` trait is defined in `tollgate_core`; it is implemented
//! here on a newtype wrapper to avoid the orphan rule:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  tollgate_core::AuthRequest (trait)        │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest(axum::extract::Request)       │
//! │  impl AuthRequest for AxumRequest { }      │
//! └────────────────────────────────────────────┘
//! ```

use axum::extract::Request as AxumExtractRequest;
use tollgate_core::AuthRequest;

/// Newtype wrapper around Axum's Request type.
#[repr(transparent)]
pub struct AxumRequest(pub AxumExtractRequest);

impl From<AxumExtractRequest> for AxumRequest {
    fn from(req: AxumExtractRequest) -> Self {
        AxumRequest(req)
    }
}

impl From<AxumRequest> for AxumExtractRequest {
    fn from(wrapper: AxumRequest) -> Self {
        wrapper.0
    }
}

impl AuthRequest for AxumRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers().get(name)?.to_str().ok()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        self.0
            .headers()
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }
}
