//! JSON replies for requests that never reach `POST /`.

use crate::verifier::handlers::reply::Rejection;
use axum::http::{Method, Uri};
use tracing::debug;

pub async fn not_found(method: Method, uri: Uri) -> Rejection {
    debug!("No route for {method} {}", uri.path());
    Rejection::NotFound
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> Rejection {
    debug!("Method {method} not allowed on {}", uri.path());
    Rejection::MethodNotAllowed
}
