//! Request metrics.
//!
//! Recorded through the `metrics` facade; the Prometheus recorder installed
//! in `main` renders them on `/metrics`. Without a recorder these are no-ops.

use std::time::Duration;

use metrics::{counter, histogram};

/// Record one dispatched request.
pub fn record_request(endpoint: &'static str, status: u16, elapsed: Duration) {
    counter!(
        "aircare_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("aircare_request_duration_ms", "endpoint" => endpoint)
        .record(elapsed.as_secs_f64() * 1000.0);
}

/// Record a failed request by error kind.
pub fn record_error(endpoint: &'static str, kind: &'static str) {
    counter!("aircare_errors_total", "endpoint" => endpoint, "kind" => kind).increment(1);
}

/// Record a measurement appended to history.
pub fn record_measurement(aqi: i32) {
    counter!("aircare_measurements_total", "aqi" => aqi.to_string()).increment(1);
}
