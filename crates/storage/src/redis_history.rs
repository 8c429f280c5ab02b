//! Measurement history in Redis Streams.
//!
//! Each location key gets its own stream; every append is an `XADD` with an
//! auto-generated id, so entries are never overwritten or merged.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, streams::StreamRangeReply, Client};
use tracing::{debug, info};

use aircare_common::{AirCareError, AirCareResult, MeasurementRecord};

use crate::history::{filter_and_sort, HistoryStore};

const STREAM_PREFIX: &str = "aircare:history:";
const RECORD_FIELD: &str = "record";

/// Stream key holding the history of one location.
pub fn stream_key(location: &str) -> String {
    format!("{}{}", STREAM_PREFIX, location)
}

/// History kept in one Redis stream per location.
pub struct RedisHistoryStore {
    conn: MultiplexedConnection,
}

impl RedisHistoryStore {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> AirCareResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| AirCareError::Configuration(format!("Redis connection failed: {}", e)))?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AirCareError::Configuration(format!("Redis connection failed: {}", e)))?;

        info!("Connected to Redis history store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl HistoryStore for RedisHistoryStore {
    async fn append(&self, record: &MeasurementRecord) -> AirCareResult<()> {
        let payload = serde_json::to_string(record)
            .map_err(|e| AirCareError::StoreWrite(format!("Serialization failed: {}", e)))?;

        // MultiplexedConnection clones share one socket
        let mut conn = self.conn.clone();
        let entry_id: String = redis::cmd("XADD")
            .arg(stream_key(&record.location))
            .arg("*")
            .arg(RECORD_FIELD)
            .arg(&payload)
            .query_async(&mut conn)
            .await
            .map_err(|e| AirCareError::StoreWrite(e.to_string()))?;

        debug!(location = %record.location, entry_id = %entry_id, "Appended history record");
        Ok(())
    }

    async fn query(
        &self,
        location: &str,
        user_id: Option<&str>,
    ) -> AirCareResult<Vec<MeasurementRecord>> {
        let mut conn = self.conn.clone();
        let reply: StreamRangeReply = redis::cmd("XRANGE")
            .arg(stream_key(location))
            .arg("-")
            .arg("+")
            .query_async(&mut conn)
            .await
            .map_err(|e| AirCareError::StoreRead(e.to_string()))?;

        let mut records = Vec::with_capacity(reply.ids.len());
        for entry in reply.ids {
            let payload: String = entry.get(RECORD_FIELD).ok_or_else(|| {
                AirCareError::StoreRead(format!("Entry {} has no record field", entry.id))
            })?;
            records.push(decode_record(&payload)?);
        }

        Ok(filter_and_sort(records, user_id))
    }

    async fn health_check(&self) -> AirCareResult<()> {
        let mut conn = self.conn.clone();
        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AirCareError::StoreRead(e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

fn decode_record(payload: &str) -> AirCareResult<MeasurementRecord> {
    serde_json::from_str(payload)
        .map_err(|e| AirCareError::StoreRead(format!("Corrupt history entry: {}", e)))
}
