use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tollgate_core::TokenError;

/// A request turned away by the token pipeline.
///
/// Every failure kind maps to `401 Unauthorized`; the body names the kind
/// so clients can tell an expired token from a missing one.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TokenRejection(#[from] pub TokenError);

impl IntoResponse for TokenRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": self.0.code(),
        });

        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(body),
        )
            .into_response()
    }
}
