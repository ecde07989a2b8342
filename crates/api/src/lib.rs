//! Mealkit API - Public REST service.
//!
//! Serves the meal-ordering storefront API: meal catalog, user accounts,
//! newsletter subscriptions, checkout (Klarna / dummy payment), and the
//! admin panel's data surface.
//!
//! # Architecture
//!
//! - Axum handlers over a shared [`state::AppState`]
//! - `PostgreSQL` via sqlx (runtime queries, `FromRow` models)
//! - Klarna payment sessions via a reqwest client in [`services::klarna`]
//! - Opaque bearer tokens for authentication ([`middleware::auth`])
//!
//! The router is assembled by [`app`] so integration tests can drive the
//! service in-process without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router.
///
/// Sentry tower layers are added in `main`, not here, so tests get a
/// router without error-tracking side effects.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
