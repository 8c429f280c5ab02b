//! The history store interface.

use async_trait::async_trait;

use aircare_common::{AirCareResult, MeasurementRecord};

/// Append-only store of measurement records, partitioned by location key.
///
/// Implementations must give read-your-writes consistency: a `query` issued
/// after a successful `append` for the same location observes that record.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert one record. Never deduplicates. Fails with `StoreWrite`.
    async fn append(&self, record: &MeasurementRecord) -> AirCareResult<()>;

    /// All records for `location`, oldest first. With `user_id`, only
    /// records carrying that exact user id. Fails with `StoreRead`.
    async fn query(
        &self,
        location: &str,
        user_id: Option<&str>,
    ) -> AirCareResult<Vec<MeasurementRecord>>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> AirCareResult<()> {
        Ok(())
    }

    /// Short backend name for logs and readiness output.
    fn backend_name(&self) -> &'static str;
}

/// Apply the optional user filter and the timestamp ordering shared by the
/// backends that cannot do it server-side.
pub(crate) fn filter_and_sort(
    mut records: Vec<MeasurementRecord>,
    user_id: Option<&str>,
) -> Vec<MeasurementRecord> {
    if let Some(user_id) = user_id {
        records.retain(|r| r.user_id.as_deref() == Some(user_id));
    }
    // stable: equal timestamps keep insertion order
    records.sort_by_key(|r| r.timestamp);
    records
}
