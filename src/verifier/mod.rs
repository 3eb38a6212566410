#![allow(clippy::needless_for_each)]

use crate::verifier::{
    handlers::{ErrorCode, Reply},
    latency::LatencyFloor,
    password::{VerificationRequest, VerificationService},
    signature::SigningKeys,
};
use anyhow::Result;
use axum::{
    Extension, Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::post,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, debug_span, info};
use ulid::Ulid;
use utoipa::OpenApi;

pub mod compare;
pub mod handlers;
pub mod latency;
pub mod password;
pub mod signature;

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Everything a request needs, built once at startup and shared read-only.
#[derive(Debug)]
pub struct RelayState {
    keys: SigningKeys,
    service: VerificationService,
    latency_floor: LatencyFloor,
}

impl RelayState {
    #[must_use]
    pub const fn new(
        keys: SigningKeys,
        service: VerificationService,
        latency_floor: LatencyFloor,
    ) -> Self {
        Self {
            keys,
            service,
            latency_floor,
        }
    }

    #[must_use]
    pub const fn keys(&self) -> &SigningKeys {
        &self.keys
    }

    #[must_use]
    pub const fn service(&self) -> &VerificationService {
        &self.service
    }

    #[must_use]
    pub const fn latency_floor(&self) -> LatencyFloor {
        self.latency_floor
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::verify::verify),
    components(
        schemas(VerificationRequest, Reply, ErrorCode)
    ),
    tags(
        (name = "verify", description = "Signed, latency-padded password verification"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the relay router.
///
/// The signing middleware sits outside every route and fallback, so no response leaves
/// without `X-Aria-Response-Sig`. Unknown paths and methods get JSON rejections too.
pub fn router(state: Arc<RelayState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", post(handlers::verify))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(Extension(Arc::clone(&state)))
        .layer(middleware::from_fn_with_state(
            state,
            handlers::sign_response,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Bind `[::]:port` and serve until Ctrl-C or SIGTERM.
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails
pub async fn new(port: u16, state: Arc<RelayState>, max_body_bytes: usize) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    serve(listener, router(state, max_body_bytes)).await
}

/// Serve `app` on an already bound listener.
/// # Errors
/// Returns an error if the server fails
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}
