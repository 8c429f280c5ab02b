//! AirCare API Service Library
//!
//! HTTP front end for air-quality lookups and per-location measurement
//! history. Endpoints are dispatched on the request path suffix so the
//! service works unchanged behind a stage-prefixed gateway.

pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod metrics;
pub mod params;
pub mod response;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the service router.
///
/// Health routes are matched exactly and skip the credential check;
/// everything else goes through the dispatcher.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .fallback(dispatch::gateway_handler)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
