//! Outbound signing stage.
//!
//! Wraps the whole router so every response, including rejections and the framework's own
//! 404/405/413 replies, leaves with `X-Aria-Response-Sig` over its exact body bytes.

use crate::verifier::{RelayState, signature::RESPONSE_SIGNATURE_HEADER};
use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

pub async fn sign_response(
    State(state): State<Arc<RelayState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let (mut parts, body) = response.into_parts();

    // Responses are small JSON documents; buffer them so the signature covers the final bytes.
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => return signing_failed(&err),
    };

    let signature = state.keys().sign_outbound(&bytes);
    let value = match HeaderValue::from_str(&signature) {
        Ok(value) => value,
        Err(err) => return signing_failed(&err),
    };

    parts.headers.insert(RESPONSE_SIGNATURE_HEADER, value);
    Response::from_parts(parts, Body::from(bytes))
}

// An unsigned body must never reach the caller; answer with a bare status instead.
fn signing_failed(err: &dyn std::fmt::Display) -> Response {
    error!(alarm = "response_signing_failed", "Could not sign response: {err}");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
