//! HTTP client for the OpenWeatherMap APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT_LANGUAGE, Client};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use aircare_common::{AirCareError, AirCareResult, Coordinates};

use crate::provider::AirQualityProvider;
use crate::types::{AirPollutionResponse, AirSample, Place};

/// Environment variable holding the provider credential.
pub const CREDENTIAL_NAME: &str = "OPENWEATHER_APIKEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Responses are always requested in English.
const LANGUAGE: &str = "en";

const DIRECT_PATH: &str = "/geo/1.0/direct";
const REVERSE_PATH: &str = "/geo/1.0/reverse";
const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";

/// Configuration for the OpenWeatherMap client.
#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    /// Scheme and host, without a trailing path
    pub base_url: String,
    pub api_key: Secret<String>,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl OpenWeatherConfig {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenWeatherMap client. Cheap to share behind an `Arc`.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenWeatherConfig) -> AirCareResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                AirCareError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// GET a provider path and decode its JSON body.
    ///
    /// The credential is appended here so it never shows up in `params`,
    /// which are logged.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AirCareResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?params, "Calling OpenWeather");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT_LANGUAGE, LANGUAGE)
            .query(params)
            .query(&[
                ("lang", LANGUAGE),
                ("appid", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!(path, error = %e, "OpenWeather request failed");
                AirCareError::Upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "OpenWeather returned an error status");
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            return Err(AirCareError::Upstream(reason));
        }

        response.json::<T>().await.map_err(|e| {
            AirCareError::Upstream(format!("Invalid provider response: {}", e.without_url()))
        })
    }
}

#[async_trait]
impl AirQualityProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn geocode_by_name(&self, query: &str, limit: u32) -> AirCareResult<Vec<Place>> {
        if query.trim().is_empty() {
            return Err(AirCareError::missing_parameter("q"));
        }

        let params = [("q", query.to_string()), ("limit", limit.to_string())];
        self.get_json(DIRECT_PATH, &params).await
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, lat: f64, lon: f64, limit: u32) -> AirCareResult<Vec<Place>> {
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_json(REVERSE_PATH, &params).await
    }

    #[instrument(skip(self), fields(location = %coords))]
    async fn lookup_air_quality(&self, coords: Coordinates) -> AirCareResult<AirSample> {
        let params = [
            ("lat", format!("{:.2}", coords.lat())),
            ("lon", format!("{:.2}", coords.lon())),
        ];
        let payload: AirPollutionResponse = self.get_json(AIR_POLLUTION_PATH, &params).await?;

        payload.list.into_iter().next().ok_or_else(|| {
            AirCareError::NoData(format!("No air quality data available for {}", coords))
        })
    }
}
