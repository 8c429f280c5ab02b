//! Provider trait used by the endpoint handlers.

use async_trait::async_trait;

use aircare_common::{AirCareResult, Coordinates};

use crate::types::{AirSample, Place};

/// Geocoding and air-quality lookups.
///
/// Implementations report transport failures and non-success statuses as
/// `AirCareError::Upstream` and an empty air-quality payload as
/// `AirCareError::NoData`.
#[async_trait]
pub trait AirQualityProvider: Send + Sync {
    /// Geocode a place name. Fails with `MissingParameter` on an empty query.
    async fn geocode_by_name(&self, query: &str, limit: u32) -> AirCareResult<Vec<Place>>;

    /// Find places near a coordinate pair.
    async fn reverse_geocode(&self, lat: f64, lon: f64, limit: u32) -> AirCareResult<Vec<Place>>;

    /// Current air quality at normalized coordinates; the first sample of
    /// the provider payload.
    async fn lookup_air_quality(&self, coords: Coordinates) -> AirCareResult<AirSample>;
}
