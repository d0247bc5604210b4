pub mod checks;
pub mod domain;
pub mod http_abstraction;
pub mod locators;
pub mod pipeline;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{payload::Payload, token_error::TokenError};

pub use ports::decoder::TokenDecoder;

pub use checks::{
    Check, check_expiry, check_version, claim, numeric_claim, pass_through, system_now,
};
pub use http_abstraction::{AuthRequest, InMemoryRequest};
pub use locators::{TokenLocator, from_anywhere, from_cookie, from_header};
pub use pipeline::Pipeline;
