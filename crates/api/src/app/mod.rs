//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store selection and engine wiring (in-memory vs Postgres)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Store selection is environment-driven; see [`services::build_services`].
pub async fn build_app() -> Router {
    let services = Arc::new(services::build_services().await);
    router_with(services)
}

/// Assemble the router around an already-wired service set.
pub fn router_with(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(services)))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::audit_log)))
}
