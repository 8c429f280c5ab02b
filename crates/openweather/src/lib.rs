//! OpenWeatherMap client for the AirCare services.
//!
//! Wraps the three provider calls the service needs:
//! - `GET /geo/1.0/direct` - geocode a place name
//! - `GET /geo/1.0/reverse` - geocode a coordinate pair
//! - `GET /data/2.5/air_pollution` - current air quality at a point

pub mod client;
pub mod provider;
pub mod types;

pub use client::{OpenWeatherClient, OpenWeatherConfig, CREDENTIAL_NAME, DEFAULT_BASE_URL};
pub use provider::AirQualityProvider;
pub use types::{AirPollutionResponse, AirSample, AqiIndex, Components, Place};
