//! Common types and utilities shared across the AirCare crates.

pub mod advice;
pub mod coords;
pub mod error;
pub mod record;

pub use advice::{advice, UNKNOWN_ADVICE};
pub use coords::{normalize_coordinate, normalize_location_key, parse_coordinate, Coordinates};
pub use error::{AirCareError, AirCareResult};
pub use record::{AirQualityReport, HistoryResponse, MeasurementRecord, Particulates};
