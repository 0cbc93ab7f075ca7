//! Request/response audit logging.
//!
//! A side channel: it records what passed through and how long it took, and
//! never affects the outcome of a request.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// Log method, path, status, and elapsed time for every request.
pub async fn audit_log(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );

    response
}
