//! Measurement history in PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::{debug, info};

use aircare_common::{AirCareError, AirCareResult, MeasurementRecord};

use crate::history::HistoryStore;

pub const DEFAULT_TABLE_NAME: &str = "aircare_history";

/// Check a table name is a plain SQL identifier.
///
/// The name is interpolated into statements, so only ASCII letters, digits
/// and underscores are accepted, starting with a letter or underscore, at
/// most 63 bytes (the PostgreSQL identifier limit).
pub fn validate_table_name(name: &str) -> AirCareResult<&str> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || name.len() > 63 {
        return Err(AirCareError::Configuration(format!(
            "invalid history table name '{}'",
            name
        )));
    }

    Ok(name)
}

/// History table backed by a connection pool.
pub struct PgHistoryStore {
    pool: PgPool,
    table: String,
}

impl PgHistoryStore {
    /// Connect to the database. The table name is validated here.
    pub async fn connect(database_url: &str, table: &str) -> AirCareResult<Self> {
        let table = validate_table_name(table)?.to_string();

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| AirCareError::Configuration(format!("Database connection failed: {}", e)))?;

        info!(table = %table, "Connected to history database");
        Ok(Self { pool, table })
    }

    /// Create the history table and index if missing.
    pub async fn migrate(&self) -> AirCareResult<()> {
        for statement in schema_sql(&self.table).split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        AirCareError::Configuration(format!("Migration failed: {}", e))
                    })?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append(&self, record: &MeasurementRecord) -> AirCareResult<()> {
        let sql = format!(
            "INSERT INTO {} (location, recorded_at, aqi, pm2_5, pm10, advice, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            self.table
        );

        sqlx::query(&sql)
            .bind(&record.location)
            .bind(record.timestamp)
            .bind(record.aqi)
            .bind(record.pm2_5)
            .bind(record.pm10)
            .bind(&record.advice)
            .bind(record.user_id.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| AirCareError::StoreWrite(e.to_string()))?;

        debug!(location = %record.location, "Appended history record");
        Ok(())
    }

    async fn query(
        &self,
        location: &str,
        user_id: Option<&str>,
    ) -> AirCareResult<Vec<MeasurementRecord>> {
        let sql = format!(
            "SELECT location, recorded_at, aqi, pm2_5, pm10, advice, user_id FROM {} \
             WHERE location = $1 AND ($2::TEXT IS NULL OR user_id = $2) \
             ORDER BY recorded_at ASC, id ASC",
            self.table
        );

        let rows = sqlx::query_as::<_, HistoryRow>(&sql)
            .bind(location)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AirCareError::StoreRead(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn health_check(&self) -> AirCareResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AirCareError::StoreRead(e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

#[derive(FromRow)]
struct HistoryRow {
    location: String,
    recorded_at: DateTime<Utc>,
    aqi: i32,
    pm2_5: f64,
    pm10: f64,
    advice: Option<String>,
    user_id: Option<String>,
}

impl From<HistoryRow> for MeasurementRecord {
    fn from(row: HistoryRow) -> Self {
        MeasurementRecord {
            location: row.location,
            timestamp: row.recorded_at,
            aqi: row.aqi,
            pm2_5: row.pm2_5,
            pm10: row.pm10,
            advice: row.advice.unwrap_or_default(),
            user_id: row.user_id,
        }
    }
}

fn schema_sql(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    id BIGSERIAL PRIMARY KEY,
    location VARCHAR(64) NOT NULL,
    recorded_at TIMESTAMPTZ NOT NULL,
    aqi INTEGER NOT NULL,
    pm2_5 DOUBLE PRECISION NOT NULL,
    pm10 DOUBLE PRECISION NOT NULL,
    advice TEXT,
    user_id TEXT
);

CREATE INDEX IF NOT EXISTS idx_{table}_location_time ON {table}(location, recorded_at);
"#
    )
}
