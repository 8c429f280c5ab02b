//! Coordinate normalization.
//!
//! History is partitioned by a `"<lat>,<lon>"` key with both components
//! rounded to two decimals, so raw client coordinates must go through here
//! before they are used for a provider lookup or a store key.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{AirCareError, AirCareResult};

/// Parse a raw coordinate string into a finite float.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub fn parse_coordinate(raw: &str) -> AirCareResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AirCareError::InvalidCoordinate(raw.to_string()))?;

    if !value.is_finite() {
        return Err(AirCareError::InvalidCoordinate(raw.to_string()));
    }

    Ok(value)
}

/// Round a coordinate to two decimal places.
///
/// The exact binary value is rounded with midpoints going away from zero,
/// so `0.125` becomes `0.13` while `2.785` (stored just below the midpoint)
/// becomes `2.78`. The result always prints back as the same 2-decimal text.
pub fn normalize_coordinate(value: f64) -> AirCareResult<f64> {
    let invalid = || AirCareError::InvalidCoordinate(value.to_string());

    if !value.is_finite() {
        return Err(invalid());
    }

    let rounded: f64 = Decimal::from_f64_retain(value)
        .ok_or_else(invalid)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .map_err(|_| invalid())?;

    // -0.001 rounds to -0.00; keep keys free of a signed zero
    if rounded == 0.0 {
        return Ok(0.0);
    }

    Ok(rounded)
}

/// Normalize a history `location` parameter.
///
/// Values that look like a coordinate pair are rounded component-wise;
/// anything else is used as an opaque key.
pub fn normalize_location_key(raw: &str) -> String {
    match Coordinates::parse_pair(raw) {
        Some(coords) => coords.location_key(),
        None => raw.to_string(),
    }
}

/// A latitude/longitude pair, always held in normalized form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Build normalized coordinates from raw floats.
    pub fn normalized(lat: f64, lon: f64) -> AirCareResult<Self> {
        Ok(Self {
            lat: normalize_coordinate(lat)?,
            lon: normalize_coordinate(lon)?,
        })
    }

    /// Parse and normalize a pair of raw strings.
    pub fn parse(lat: &str, lon: &str) -> AirCareResult<Self> {
        Self::normalized(parse_coordinate(lat)?, parse_coordinate(lon)?)
    }

    /// Parse a `"<lat>,<lon>"` string. Returns `None` if it is not a pair
    /// of finite numbers.
    pub fn parse_pair(s: &str) -> Option<Self> {
        let (lat, lon) = s.split_once(',')?;
        Self::parse(lat, lon).ok()
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Canonical history partition key, e.g. `"1.23,2.79"`.
    pub fn location_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2},{:.2}", self.lat, self.lon)
    }
}
