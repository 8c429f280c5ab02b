//! Tests for the OpenWeather client against a local stand-in provider.
//!
//! Each test binds a throwaway axum server on 127.0.0.1:0 that mimics the
//! three provider endpoints closely enough to exercise the success and
//! failure contract.

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{header::ACCEPT_LANGUAGE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use aircare_common::{AirCareError, Coordinates};
use openweather::{AirQualityProvider, OpenWeatherClient, OpenWeatherConfig};
use secrecy::Secret;

const API_KEY: &str = "test-key";

// ============================================================================
// Stand-in provider
// ============================================================================

/// Reject requests without the credential or the English preference.
fn check_request(params: &HashMap<String, String>, headers: &HeaderMap) -> Option<Response> {
    if params.get("appid").map(String::as_str) != Some(API_KEY) {
        return Some(StatusCode::UNAUTHORIZED.into_response());
    }
    let english_header = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        == Some("en");
    if !english_header || params.get("lang").map(String::as_str) != Some("en") {
        return Some(StatusCode::NOT_ACCEPTABLE.into_response());
    }
    None
}

async fn direct(Query(params): Query<HashMap<String, String>>, headers: HeaderMap) -> Response {
    if let Some(rejection) = check_request(&params, &headers) {
        return rejection;
    }
    match params.get("q").map(String::as_str) {
        Some("London") => Json(json!([
            {"name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB", "state": "England"},
            {"name": "London", "lat": 42.9834, "lon": -81.2330, "country": "CA", "state": "Ontario"}
        ]))
        .into_response(),
        Some("Garbage") => (StatusCode::OK, "definitely not json").into_response(),
        Some("Overload") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn reverse(Query(params): Query<HashMap<String, String>>, headers: HeaderMap) -> Response {
    if let Some(rejection) = check_request(&params, &headers) {
        return rejection;
    }
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(1);
    let places: Vec<_> = (0..limit)
        .map(|i| json!({"name": format!("Place {}", i), "lat": 48.86, "lon": 2.35, "country": "FR"}))
        .collect();
    Json(places).into_response()
}

async fn air_pollution(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = check_request(&params, &headers) {
        return rejection;
    }
    let lat = params.get("lat").cloned().unwrap_or_default();
    let lon = params.get("lon").cloned().unwrap_or_default();
    if lat == "0.00" && lon == "0.00" {
        return Json(json!({"coord": {"lat": 0.0, "lon": 0.0}, "list": []})).into_response();
    }
    Json(json!({
        "coord": {"lat": lat, "lon": lon},
        "list": [
            {"main": {"aqi": 2}, "components": {"pm2_5": 5.0, "pm10": 10.0, "o3": 60.1}, "dt": 1700000000},
            {"main": {"aqi": 5}, "components": {"pm2_5": 500.0, "pm10": 900.0}, "dt": 1700003600}
        ]
    }))
    .into_response()
}

async fn spawn_provider() -> String {
    let app = Router::new()
        .route("/geo/1.0/direct", get(direct))
        .route("/geo/1.0/reverse", get(reverse))
        .route("/data/2.5/air_pollution", get(air_pollution));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client_for(base_url: &str, key: &str) -> OpenWeatherClient {
    let config =
        OpenWeatherConfig::new(Secret::new(key.to_string())).with_base_url(base_url.to_string());
    OpenWeatherClient::new(config).unwrap()
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn test_geocode_by_name_returns_candidates_in_order() {
    let base = spawn_provider().await;
    let client = client_for(&base, API_KEY);

    let places = client.geocode_by_name("London", 5).await.unwrap();
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].country, "GB");
    assert_eq!(places[1].state.as_deref(), Some("Ontario"));
}

#[tokio::test]
async fn test_geocode_by_name_empty_result() {
    let base = spawn_provider().await;
    let client = client_for(&base, API_KEY);

    let places = client.geocode_by_name("Atlantis", 1).await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn test_reverse_geocode_passes_limit() {
    let base = spawn_provider().await;
    let client = client_for(&base, API_KEY);

    let places = client.reverse_geocode(48.8566, 2.3522, 3).await.unwrap();
    assert_eq!(places.len(), 3);
    assert_eq!(places[2].name, "Place 2");
}

// ============================================================================
// Air quality
// ============================================================================

#[tokio::test]
async fn test_lookup_air_quality_returns_first_sample() {
    let base = spawn_provider().await;
    let client = client_for(&base, API_KEY);

    let coords = Coordinates::normalized(1.234, 2.786).unwrap();
    let sample = client.lookup_air_quality(coords).await.unwrap();
    assert_eq!(sample.aqi(), 2);
    assert_eq!(sample.components.pm2_5, 5.0);
    assert_eq!(sample.components.pm10, 10.0);
}

#[tokio::test]
async fn test_lookup_air_quality_no_data() {
    let base = spawn_provider().await;
    let client = client_for(&base, API_KEY);

    let coords = Coordinates::normalized(0.0, 0.0).unwrap();
    let err = client.lookup_air_quality(coords).await.unwrap_err();
    assert!(matches!(err, AirCareError::NoData(_)), "got {:?}", err);
}

// ============================================================================
// Failure contract
// ============================================================================

#[tokio::test]
async fn test_status_text_is_propagated() {
    let base = spawn_provider().await;
    let client = client_for(&base, "wrong-key");

    let err = client.geocode_by_name("London", 5).await.unwrap_err();
    assert_eq!(err, AirCareError::Upstream("Unauthorized".to_string()));
}

#[tokio::test]
async fn test_server_error_status() {
    let base = spawn_provider().await;
    let client = client_for(&base, API_KEY);

    let err = client.geocode_by_name("Overload", 5).await.unwrap_err();
    assert_eq!(err, AirCareError::Upstream("Service Unavailable".to_string()));
}

#[tokio::test]
async fn test_undecodable_body_is_upstream_error() {
    let base = spawn_provider().await;
    let client = client_for(&base, API_KEY);

    let err = client.geocode_by_name("Garbage", 5).await.unwrap_err();
    match err {
        AirCareError::Upstream(message) => {
            assert!(message.starts_with("Invalid provider response"));
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_failure_does_not_leak_key() {
    // Nothing listens on port 1
    let client = client_for("http://127.0.0.1:1", "leaky-key");

    let err = client.geocode_by_name("London", 5).await.unwrap_err();
    match err {
        AirCareError::Upstream(message) => assert!(!message.contains("leaky-key")),
        other => panic!("expected Upstream, got {:?}", other),
    }
}
