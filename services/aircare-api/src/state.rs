//! Application state for the AirCare API.

use std::sync::Arc;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

use aircare_common::{AirCareError, AirCareResult};
use openweather::{AirQualityProvider, OpenWeatherClient, CREDENTIAL_NAME};
use storage::{HistoryStore, MemoryHistoryStore, PgHistoryStore, RedisHistoryStore};

use crate::config::{Args, HistoryBackend};

/// Shared application state.
pub struct AppState {
    /// Provider client; `None` when no credential was configured.
    provider: Option<Arc<dyn AirQualityProvider>>,

    /// Measurement history backend.
    pub store: Arc<dyn HistoryStore>,

    /// Prometheus exporter handle, rendered by `/metrics`.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        provider: Option<Arc<dyn AirQualityProvider>>,
        store: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            provider,
            store,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Build state from parsed arguments, connecting the history backend.
    ///
    /// A missing provider credential is not fatal here; every dispatched
    /// request reports it instead.
    pub async fn from_args(args: &Args) -> Result<Self> {
        let provider: Option<Arc<dyn AirQualityProvider>> = match args.provider_config() {
            Some(config) => {
                info!(base_url = %config.base_url, "Configured OpenWeatherMap provider");
                Some(Arc::new(OpenWeatherClient::new(config)?))
            }
            None => {
                warn!("{} is not set; requests will fail until it is", CREDENTIAL_NAME);
                None
            }
        };

        let store: Arc<dyn HistoryStore> = match args.history_backend {
            HistoryBackend::Postgres => {
                let store = PgHistoryStore::connect(&args.database_url, &args.table_name).await?;
                store.migrate().await?;
                Arc::new(store)
            }
            HistoryBackend::Redis => Arc::new(RedisHistoryStore::connect(&args.redis_url).await?),
            HistoryBackend::Memory => {
                warn!("Using in-memory history store; history is lost on restart");
                Arc::new(MemoryHistoryStore::new())
            }
        };

        info!(backend = store.backend_name(), "History store ready");
        Ok(Self::new(provider, store))
    }

    /// The provider client, or the missing-credential error.
    pub fn provider(&self) -> AirCareResult<&dyn AirQualityProvider> {
        self.provider
            .as_deref()
            .ok_or_else(|| AirCareError::MissingCredential(CREDENTIAL_NAME.to_string()))
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }
}
