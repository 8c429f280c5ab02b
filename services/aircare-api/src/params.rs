//! Typed query parameters for each endpoint.
//!
//! Raw query strings are parsed once here; handlers only see validated
//! values. Empty or whitespace-only parameters count as absent.

use std::collections::HashMap;

use aircare_common::{parse_coordinate, AirCareError, AirCareResult};

/// Raw query string parameters.
pub type QueryParams = HashMap<String, String>;

pub const DEFAULT_DIRECT_LIMIT: u32 = 5;
pub const DEFAULT_REVERSE_LIMIT: u32 = 1;

fn param<'a>(params: &'a QueryParams, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn parse_limit(params: &QueryParams, default: u32) -> AirCareResult<u32> {
    match param(params, "limit") {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or_else(|| AirCareError::invalid_parameter("limit", raw)),
    }
}

/// `geo/direct?q=&limit=`
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDirectParams {
    pub q: String,
    pub limit: u32,
}

impl GeoDirectParams {
    pub fn from_query(params: &QueryParams) -> AirCareResult<Self> {
        let q = param(params, "q").ok_or_else(|| AirCareError::missing_parameter("q"))?;
        Ok(Self {
            q: q.to_string(),
            limit: parse_limit(params, DEFAULT_DIRECT_LIMIT)?,
        })
    }
}

/// `geo/reverse?lat=&lon=&limit=`
#[derive(Debug, Clone, PartialEq)]
pub struct GeoReverseParams {
    pub lat: f64,
    pub lon: f64,
    pub limit: u32,
}

impl GeoReverseParams {
    pub fn from_query(params: &QueryParams) -> AirCareResult<Self> {
        let (lat, lon) = match (param(params, "lat"), param(params, "lon")) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AirCareError::MissingParameter(
                    "Missing 'lat' or 'lon' parameter".to_string(),
                ))
            }
        };

        Ok(Self {
            lat: parse_coordinate(lat)?,
            lon: parse_coordinate(lon)?,
            limit: parse_limit(params, DEFAULT_REVERSE_LIMIT)?,
        })
    }
}

/// How an air lookup finds its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSource {
    /// Geocode the name and use the first candidate
    City(String),
    /// Raw client coordinates, not yet normalized
    Point { lat: f64, lon: f64 },
}

/// `air?city=` or `air?lat=&lon=`, plus optional `userId`
#[derive(Debug, Clone, PartialEq)]
pub struct AirParams {
    pub source: CoordinateSource,
    pub user_id: Option<String>,
}

impl AirParams {
    pub fn from_query(params: &QueryParams) -> AirCareResult<Self> {
        let source = if let Some(city) = param(params, "city") {
            CoordinateSource::City(city.to_string())
        } else {
            match (param(params, "lat"), param(params, "lon")) {
                (Some(lat), Some(lon)) => CoordinateSource::Point {
                    lat: parse_coordinate(lat)?,
                    lon: parse_coordinate(lon)?,
                },
                _ => {
                    return Err(AirCareError::MissingParameter(
                        "Missing 'city' or 'lat'+'lon'".to_string(),
                    ))
                }
            }
        };

        Ok(Self {
            source,
            user_id: param(params, "userId").map(str::to_string),
        })
    }
}

/// `history?location=&userId=`
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryParams {
    /// As supplied; normalized by the handler
    pub location: String,
    pub user_id: Option<String>,
}

impl HistoryParams {
    pub fn from_query(params: &QueryParams) -> AirCareResult<Self> {
        let location = param(params, "location")
            .ok_or_else(|| AirCareError::missing_parameter("location"))?;

        Ok(Self {
            location: location.to_string(),
            user_id: param(params, "userId").map(str::to_string),
        })
    }
}
