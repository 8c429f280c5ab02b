//! Common test utilities for aircare-api tests
//!
//! Provides:
//! - A scripted provider that records the calls it receives
//! - A history store whose writes always fail
//! - Helpers to build state and query maps

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use aircare_api::params::QueryParams;
use aircare_api::state::AppState;
use aircare_common::{AirCareError, AirCareResult, Coordinates, MeasurementRecord};
use openweather::{AirQualityProvider, AirSample, Place};
use storage::{HistoryStore, MemoryHistoryStore};

/// A provider call as seen by [`FakeProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    Direct { query: String, limit: u32 },
    Reverse { lat: f64, lon: f64, limit: u32 },
    Air { lat: f64, lon: f64 },
}

/// Provider returning canned places and a canned sample.
#[derive(Default)]
pub struct FakeProvider {
    pub places: Vec<Place>,
    pub sample: Option<AirSample>,
    pub error: Option<AirCareError>,
    pub calls: Mutex<Vec<ProviderCall>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places(mut self, places: Vec<Place>) -> Self {
        self.places = places;
        self
    }

    pub fn with_sample(mut self, sample: AirSample) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Every call fails with `error`.
    pub fn failing(error: AirCareError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ProviderCall) -> AirCareResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AirQualityProvider for FakeProvider {
    async fn geocode_by_name(&self, query: &str, limit: u32) -> AirCareResult<Vec<Place>> {
        self.record(ProviderCall::Direct {
            query: query.to_string(),
            limit,
        })?;
        Ok(self.places.iter().take(limit as usize).cloned().collect())
    }

    async fn reverse_geocode(&self, lat: f64, lon: f64, limit: u32) -> AirCareResult<Vec<Place>> {
        self.record(ProviderCall::Reverse { lat, lon, limit })?;
        Ok(self.places.iter().take(limit as usize).cloned().collect())
    }

    async fn lookup_air_quality(&self, coords: Coordinates) -> AirCareResult<AirSample> {
        self.record(ProviderCall::Air {
            lat: coords.lat(),
            lon: coords.lon(),
        })?;
        self.sample.clone().ok_or_else(|| {
            AirCareError::NoData(format!("No air quality data available for {}", coords))
        })
    }
}

/// Store whose appends always fail; reads return nothing.
pub struct FailingStore;

#[async_trait]
impl HistoryStore for FailingStore {
    async fn append(&self, _record: &MeasurementRecord) -> AirCareResult<()> {
        Err(AirCareError::StoreWrite("connection reset".to_string()))
    }

    async fn query(
        &self,
        _location: &str,
        _user_id: Option<&str>,
    ) -> AirCareResult<Vec<MeasurementRecord>> {
        Err(AirCareError::StoreRead("connection reset".to_string()))
    }

    async fn health_check(&self) -> AirCareResult<()> {
        Err(AirCareError::StoreRead("connection reset".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

pub fn sample(aqi: i32, pm2_5: f64, pm10: f64) -> AirSample {
    serde_json::from_value(json!({
        "main": { "aqi": aqi },
        "components": { "pm2_5": pm2_5, "pm10": pm10, "co": 201.94 },
        "dt": 1_700_000_000
    }))
    .unwrap()
}

pub fn place(name: &str, lat: f64, lon: f64) -> Place {
    serde_json::from_value(json!({
        "name": name,
        "local_names": { "en": name },
        "lat": lat,
        "lon": lon,
        "country": "DE"
    }))
    .unwrap()
}

pub fn query(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// State over a fake provider and a fresh in-memory store.
pub fn state_with(provider: Arc<FakeProvider>) -> (AppState, Arc<MemoryHistoryStore>) {
    let store = Arc::new(MemoryHistoryStore::new());
    let state = AppState::new(Some(provider as Arc<dyn AirQualityProvider>), store.clone());
    (state, store)
}

/// State with no provider credential.
pub fn unconfigured_state() -> AppState {
    AppState::new(None, Arc::new(MemoryHistoryStore::new()))
}
