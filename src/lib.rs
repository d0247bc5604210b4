//! # Tollgate - Request Token Validation
//!
//! Facade crate that re-exports the public API of the tollgate components.
//! A pipeline locates a token on a request, decodes it into a claims
//! payload, then runs an ordered list of checks over that payload. The first
//! failure short-circuits.
//!
//! ## Usage
//!
//! ```no_run
//! use serde_json::json;
//! use tollgate::{
//!     check_expiry, check_version, claim, from_anywhere, numeric_claim,
//!     process_request_token, system_now,
//! };
//!
//! let pipeline = process_request_token(from_anywhere("jwt"), "secret", Vec::new())
//!     .check(check_version(claim("version"), json!(1)))
//!     .check(check_expiry(numeric_claim("expiry"), system_now));
//! # let _ = pipeline;
//! ```
//!
//! ## Structure
//!
//! - **Core**: `Payload`, `TokenError`, locators, checks, `Pipeline`
//! - **Adapters**: `JwtDecoder`, `RequestHeaders`, `TokenSettings`, tracing setup
//! - **Axum**: `AxumRequest`, `TokenRejection`, `require_token` middleware

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, locators and checks
pub mod core {
    pub use tollgate_core::*;
}

pub use tollgate_core::{
    AuthRequest, Check, InMemoryRequest, Payload, Pipeline, TokenDecoder, TokenError,
    TokenLocator, check_expiry, check_version, claim, from_anywhere, from_cookie, from_header,
    numeric_claim, pass_through, system_now,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP header access
    pub mod http {
        pub use tollgate_adapters::http::*;
    }

    /// JWT decoding
    pub mod jwt {
        pub use tollgate_adapters::jwt::*;
    }

    /// Configuration
    pub mod config {
        pub use tollgate_adapters::config::*;
    }

    /// Tracing setup
    pub mod telemetry {
        pub use tollgate_adapters::telemetry::*;
    }
}

pub use tollgate_adapters::{
    config::{SettingsError, TokenSettings, TokenSource},
    http::RequestHeaders,
    jwt::{JwtDecoder, decode_token, process_request_token},
    telemetry::init_tracing,
};

// ============================================================================
// Axum Integration
// ============================================================================

/// Axum middleware and request adapter
pub mod axum {
    pub use tollgate_axum::*;
}

pub use tollgate_axum::{AxumRequest, TokenRejection, require_token};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
pub use serde_json;
