//! Air-quality lookup.
//!
//! Resolves coordinates (geocoding a city if given), normalizes them,
//! fetches the current sample, appends it to history and returns the
//! report. The report is only sent once the write has succeeded.

use tracing::{info, instrument};

use aircare_common::{
    AirCareError, AirCareResult, AirQualityReport, Coordinates, MeasurementRecord,
};
use openweather::AirQualityProvider;

use crate::metrics;
use crate::params::{AirParams, CoordinateSource, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Cities resolve to the first geocoding candidate only.
pub const CITY_LOOKUP_LIMIT: u32 = 1;

#[instrument(skip(state, params))]
pub async fn lookup(state: &AppState, params: &QueryParams) -> AirCareResult<ApiResponse> {
    let provider = state.provider()?;
    let params = AirParams::from_query(params)?;

    let coords = resolve_coordinates(provider, &params.source).await?;
    let sample = provider.lookup_air_quality(coords).await?;

    let record = MeasurementRecord::new(
        &coords,
        sample.aqi(),
        sample.particulates(),
        params.user_id,
    );
    state.store.append(&record).await?;
    metrics::record_measurement(record.aqi);

    info!(
        location = %record.location,
        aqi = record.aqi,
        user_id = ?record.user_id,
        "Recorded air quality"
    );

    Ok(ApiResponse::ok(&AirQualityReport::from(&record)))
}

async fn resolve_coordinates(
    provider: &dyn AirQualityProvider,
    source: &CoordinateSource,
) -> AirCareResult<Coordinates> {
    match source {
        CoordinateSource::City(city) => {
            let places = provider.geocode_by_name(city, CITY_LOOKUP_LIMIT).await?;
            let place = places
                .first()
                .ok_or_else(|| AirCareError::NotFound("City not found".to_string()))?;
            Coordinates::normalized(place.lat, place.lon)
        }
        CoordinateSource::Point { lat, lon } => Coordinates::normalized(*lat, *lon),
    }
}
