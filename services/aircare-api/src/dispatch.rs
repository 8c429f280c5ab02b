//! Path-suffix request dispatch.
//!
//! The service may be mounted behind a gateway that prefixes paths with a
//! stage name (`/prod/air`), so endpoints are matched on the path suffix in
//! a fixed order rather than by exact route.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Query},
    http::{Method, Uri},
};
use tracing::{info, warn};

use aircare_common::{AirCareError, AirCareResult};

use crate::handlers;
use crate::metrics;
use crate::params::QueryParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// A dispatched endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    GeoDirect,
    GeoReverse,
    Air,
    History,
}

impl Endpoint {
    /// Metric label and log field.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GeoDirect => "geo_direct",
            Endpoint::GeoReverse => "geo_reverse",
            Endpoint::Air => "air",
            Endpoint::History => "history",
        }
    }
}

/// Suffixes checked in order; the first match wins.
pub const ROUTES: [(&str, Endpoint); 4] = [
    ("/geo/direct", Endpoint::GeoDirect),
    ("/geo/reverse", Endpoint::GeoReverse),
    ("/air", Endpoint::Air),
    ("/history", Endpoint::History),
];

/// Resolve a request path to an endpoint. A single trailing slash is
/// ignored.
pub fn resolve(path: &str) -> Option<Endpoint> {
    let path = path.strip_suffix('/').unwrap_or(path);
    ROUTES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map(|(_, endpoint)| *endpoint)
}

/// Dispatch one request and wrap the outcome in the response envelope.
///
/// The provider credential is checked before routing, so a misconfigured
/// deployment fails every request the same way.
pub async fn dispatch(state: &AppState, path: &str, params: &QueryParams) -> ApiResponse {
    let start = Instant::now();
    let endpoint = resolve(path);
    let label = endpoint.map(|e| e.name()).unwrap_or("unknown");

    let result = match state.provider() {
        Err(e) => Err(e),
        Ok(_) => match endpoint {
            Some(endpoint) => route(state, endpoint, params).await,
            None => Err(AirCareError::UnknownEndpoint(path.to_string())),
        },
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!(endpoint = label, path = %path, kind = e.kind(), error = %e, "Request failed");
            metrics::record_error(label, e.kind());
            ApiResponse::error(&e)
        }
    };

    let elapsed = start.elapsed();
    metrics::record_request(label, response.status.as_u16(), elapsed);
    info!(
        endpoint = label,
        status = response.status.as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Handled request"
    );

    response
}

async fn route(
    state: &AppState,
    endpoint: Endpoint,
    params: &QueryParams,
) -> AirCareResult<ApiResponse> {
    match endpoint {
        Endpoint::GeoDirect => handlers::geo::direct(state, params).await,
        Endpoint::GeoReverse => handlers::geo::reverse(state, params).await,
        Endpoint::Air => handlers::air::lookup(state, params).await,
        Endpoint::History => handlers::history::history(state, params).await,
    }
}

/// Fallback handler for every path not claimed by the health routes.
pub async fn gateway_handler(
    Extension(state): Extension<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> ApiResponse {
    if method == Method::OPTIONS {
        return ApiResponse::preflight();
    }

    match Query::<QueryParams>::try_from_uri(&uri) {
        Ok(Query(params)) => dispatch(&state, uri.path(), &params).await,
        Err(rejection) => {
            ApiResponse::error(&AirCareError::invalid_parameter("query", rejection.body_text()))
        }
    }
}
