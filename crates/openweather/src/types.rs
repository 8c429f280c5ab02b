//! Provider payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use aircare_common::Particulates;

/// A geocoding candidate.
///
/// Fields the service does not read (`local_names` and friends) are kept in
/// `extra` so candidates pass through to the caller unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the air pollution endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub list: Vec<AirSample>,
}

/// One air pollution sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirSample {
    pub main: AqiIndex,
    pub components: Components,
    /// Unix time of the sample
    #[serde(default)]
    pub dt: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiIndex {
    pub aqi: i32,
}

/// Pollutant concentrations in µg/m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub pm2_5: f64,
    pub pm10: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nh3: Option<f64>,
}

impl AirSample {
    pub fn aqi(&self) -> i32 {
        self.main.aqi
    }

    pub fn particulates(&self) -> Particulates {
        Particulates {
            pm2_5: self.components.pm2_5,
            pm10: self.components.pm10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_keeps_unknown_fields() {
        let json = serde_json::json!({
            "name": "London",
            "local_names": {"en": "London", "fr": "Londres"},
            "lat": 51.5073219,
            "lon": -0.1276474,
            "country": "GB",
            "state": "England"
        });

        let place: Place = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(place.name, "London");
        assert_eq!(place.state.as_deref(), Some("England"));
        assert!(place.extra.contains_key("local_names"));

        assert_eq!(serde_json::to_value(&place).unwrap(), json);
    }

    #[test]
    fn test_place_without_state() {
        let json = r#"{"name": "Monaco", "lat": 43.73, "lon": 7.42, "country": "MC"}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert!(place.state.is_none());

        let out = serde_json::to_value(&place).unwrap();
        assert!(out.get("state").is_none());
    }

    #[test]
    fn test_air_pollution_payload() {
        let json = r#"{
            "coord": {"lon": 2.35, "lat": 48.86},
            "list": [{
                "main": {"aqi": 2},
                "components": {
                    "co": 201.94, "no": 0.02, "no2": 0.77, "o3": 68.66,
                    "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12
                },
                "dt": 1606147200
            }]
        }"#;

        let payload: AirPollutionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.list.len(), 1);

        let sample = &payload.list[0];
        assert_eq!(sample.aqi(), 2);
        assert_eq!(sample.particulates(), Particulates { pm2_5: 0.5, pm10: 0.54 });
        assert_eq!(sample.components.o3, Some(68.66));
    }

    #[test]
    fn test_air_pollution_empty_list() {
        let payload: AirPollutionResponse = serde_json::from_str(r#"{"coord": {}}"#).unwrap();
        assert!(payload.list.is_empty());
    }
}
