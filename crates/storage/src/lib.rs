//! History storage for AirCare services.
//!
//! Provides one append-only interface over:
//! - PostgreSQL (a single history table)
//! - Redis Streams (one stream per location key)
//! - Process memory, for development and tests

pub mod history;
pub mod memory;
pub mod pg_history;
pub mod redis_history;

pub use history::HistoryStore;
pub use memory::MemoryHistoryStore;
pub use pg_history::{validate_table_name, PgHistoryStore, DEFAULT_TABLE_NAME};
pub use redis_history::{stream_key, RedisHistoryStore};
