//! Measurement records and the response bodies built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{advice, Coordinates};

/// Particulate concentrations in µg/m³, copied verbatim from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particulates {
    pub pm2_5: f64,
    pub pm10: f64,
}

/// One historical air-quality sample.
///
/// Records are append-only: created by an air lookup, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Normalized `"<lat>,<lon>"` partition key
    pub location: String,
    /// Write time, set by the backend
    pub timestamp: DateTime<Utc>,
    pub aqi: i32,
    pub pm2_5: f64,
    pub pm10: f64,
    /// Display text derived from `aqi`. Stored for reference only; readers
    /// should call [`MeasurementRecord::with_current_advice`].
    #[serde(default)]
    pub advice: String,
    #[serde(
        rename = "userId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
}

impl MeasurementRecord {
    /// Build a record stamped with the current instant.
    pub fn new(
        coords: &Coordinates,
        aqi: i32,
        particulates: Particulates,
        user_id: Option<String>,
    ) -> Self {
        Self::at(coords, Utc::now(), aqi, particulates, user_id)
    }

    /// Build a record with an explicit timestamp.
    pub fn at(
        coords: &Coordinates,
        timestamp: DateTime<Utc>,
        aqi: i32,
        particulates: Particulates,
        user_id: Option<String>,
    ) -> Self {
        Self {
            location: coords.location_key(),
            timestamp,
            aqi,
            pm2_5: particulates.pm2_5,
            pm10: particulates.pm10,
            advice: advice(aqi).to_string(),
            user_id,
        }
    }

    /// Replace the stored advice with the text for the current mapping.
    pub fn with_current_advice(mut self) -> Self {
        self.advice = advice(self.aqi).to_string();
        self
    }

    pub fn particulates(&self) -> Particulates {
        Particulates {
            pm2_5: self.pm2_5,
            pm10: self.pm10,
        }
    }
}

/// Body of a successful air lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub aqi: i32,
    pub advice: String,
    pub components: Particulates,
}

impl From<&MeasurementRecord> for AirQualityReport {
    fn from(record: &MeasurementRecord) -> Self {
        Self {
            location: record.location.clone(),
            timestamp: record.timestamp,
            aqi: record.aqi,
            advice: record.advice.clone(),
            components: record.particulates(),
        }
    }
}

/// Body of a history lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// The location as the caller supplied it
    pub location: String,
    pub history: Vec<MeasurementRecord>,
}
