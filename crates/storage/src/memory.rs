//! In-process history store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use aircare_common::{AirCareResult, MeasurementRecord};

use crate::history::{filter_and_sort, HistoryStore};

/// History kept in a map of location key to records.
///
/// Not persistent; used for local development and as the store in tests.
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: RwLock<HashMap<String, Vec<MeasurementRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all locations.
    pub async fn len(&self) -> usize {
        self.records.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: &MeasurementRecord) -> AirCareResult<()> {
        self.records
            .write()
            .await
            .entry(record.location.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn query(
        &self,
        location: &str,
        user_id: Option<&str>,
    ) -> AirCareResult<Vec<MeasurementRecord>> {
        let records = self
            .records
            .read()
            .await
            .get(location)
            .cloned()
            .unwrap_or_default();

        Ok(filter_and_sort(records, user_id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
