use crate::verifier::{
    RelayState,
    handlers::reply::{ErrorCode, Rejection, Reply},
    password::{VerificationOutcome, VerificationRequest},
    signature::{REQUEST_SIGNATURE_HEADER, SigningKeys},
};
use axum::{
    body::Bytes,
    extract::{Extension, rejection::BytesRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

#[utoipa::path(
    post,
    path = "/",
    request_body(content = VerificationRequest, content_type = "application/json"),
    params(
        ("X-Aria-Request-Sig" = String, Header, description = "Hex HMAC-SHA256 of the raw request body, keyed with the request secret"),
    ),
    responses(
        (status = 200, description = "Password matched (`success: true`) or did not (`PASSWORD_MISMATCH`)", body = Reply,
            headers(("X-Aria-Response-Sig" = String, description = "Hex HMAC-SHA256 of the raw response body, keyed with the response secret"))),
        (status = 400, description = "`INVALID_BODY` or `MISSING_PARAMS`", body = Reply),
        (status = 401, description = "`MISSING_SIGNATURE` or `INVALID_SIGNATURE`", body = Reply),
        (status = 413, description = "`BODY_TOO_LARGE`", body = Reply),
        (status = 500, description = "`VERIFICATION_ERROR`", body = Reply),
    ),
    tag = "verify",
)]
// axum handler for password verification
#[instrument(skip_all)]
pub async fn verify(
    Extension(state): Extension<Arc<RelayState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let result = match read_body(body) {
        Ok(body) => handle(&state, &headers, &body).await,
        Err(rejection) => Err(rejection),
    };

    match result {
        Ok(reply) => reply.into_response(),
        Err(rejection) => {
            warn!(category = rejection.category(), "Request rejected: {rejection}");
            rejection.into_response()
        }
    }
}

async fn handle(state: &RelayState, headers: &HeaderMap, body: &[u8]) -> Result<Reply, Rejection> {
    authenticate(state.keys(), headers, body)?;
    let request = parse(body)?;

    let outcome = state
        .latency_floor()
        .run(state.service().verify(request))
        .await;

    verdict(outcome)
}

/// The body limit rejects before the handler body runs; answer in JSON like every other rejection.
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, Rejection> {
    body.map_err(|err| {
        debug!("Reading request body failed: {}", err.body_text());
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Rejection::BodyTooLarge
        } else {
            Rejection::InvalidBody
        }
    })
}

/// Check the request signature before anything looks at the body.
fn authenticate(keys: &SigningKeys, headers: &HeaderMap, body: &[u8]) -> Result<(), Rejection> {
    let claimed = headers
        .get(REQUEST_SIGNATURE_HEADER)
        .map(HeaderValue::as_bytes)
        .filter(|value| !value.is_empty())
        .ok_or(Rejection::MissingSignature)?;

    if keys.verify_inbound(body, claimed) {
        Ok(())
    } else {
        Err(Rejection::InvalidSignature)
    }
}

/// Parse the exact bytes that were signed.
fn parse(body: &[u8]) -> Result<VerificationRequest, Rejection> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        debug!("Parsing request body failed: {:?}", err.classify());
        Rejection::InvalidBody
    })?;

    serde_json::from_value(value).map_err(|_| Rejection::MissingParams)
}

fn verdict(outcome: VerificationOutcome) -> Result<Reply, Rejection> {
    match outcome {
        VerificationOutcome::Match => Ok(Reply::success()),
        VerificationOutcome::Mismatch => Ok(Reply::failure(ErrorCode::PasswordMismatch)),
        VerificationOutcome::Error(err) => {
            error!(class = err.class(), "Password verification failed");
            Err(Rejection::Verification)
        }
    }
}
