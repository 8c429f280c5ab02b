//! Geocoding pass-through endpoints.

use tracing::{debug, instrument};

use aircare_common::AirCareResult;

use crate::params::{GeoDirectParams, GeoReverseParams, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// `geo/direct`: place candidates for a name, returned unmodified.
#[instrument(skip(state, params))]
pub async fn direct(state: &AppState, params: &QueryParams) -> AirCareResult<ApiResponse> {
    let provider = state.provider()?;
    let params = GeoDirectParams::from_query(params)?;

    let places = provider.geocode_by_name(&params.q, params.limit).await?;
    debug!(q = %params.q, count = places.len(), "Geocoded place name");

    Ok(ApiResponse::ok(&places))
}

/// `geo/reverse`: places near a coordinate pair, returned unmodified.
#[instrument(skip(state, params))]
pub async fn reverse(state: &AppState, params: &QueryParams) -> AirCareResult<ApiResponse> {
    let provider = state.provider()?;
    let params = GeoReverseParams::from_query(params)?;

    let places = provider
        .reverse_geocode(params.lat, params.lon, params.limit)
        .await?;
    debug!(lat = params.lat, lon = params.lon, count = places.len(), "Reverse geocoded");

    Ok(ApiResponse::ok(&places))
}
