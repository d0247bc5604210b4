//! Route protection backed by a token pipeline.
//!
//! A validated [`Payload`] is inserted into request extensions, so handlers
//! read it with `Extension<Payload>`.
//!
//! [`Payload`]: tollgate_core::Payload

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use tollgate_core::{Pipeline, TokenDecoder};

use crate::{AxumRequest, TokenRejection};

/// Run the pipeline against the incoming request.
///
/// On success the payload is attached to the request and the inner service
/// runs; any failure short-circuits with a `401`.
#[tracing::instrument(name = "Require Token", skip_all)]
pub async fn require_token<D>(
    State(pipeline): State<Arc<Pipeline<D>>>,
    request: Request,
    next: Next,
) -> Result<Response, TokenRejection>
where
    D: TokenDecoder + 'static,
{
    let request = AxumRequest(request);

    let payload = pipeline.process(&request).map_err(|err| {
        tracing::warn!(code = err.code(), error = %err, "Rejected request token");
        TokenRejection(err)
    })?;

    let mut request = Request::from(request);
    request.extensions_mut().insert(payload);

    Ok(next.run(request).await)
}

/// Guard every route of `router` with `pipeline`.
pub fn apply<S, D>(router: Router<S>, pipeline: Pipeline<D>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    D: TokenDecoder + 'static,
{
    router.layer(middleware::from_fn_with_state(
        Arc::new(pipeline),
        require_token::<D>,
    ))
}
