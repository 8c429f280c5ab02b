//! Error types for AirCare services.

use thiserror::Error;

/// Result type alias using AirCareError.
pub type AirCareResult<T> = Result<T, AirCareError>;

/// Primary error type for AirCare operations.
///
/// Every variant carries a message that is safe to hand back to the caller
/// verbatim in the `{"error": ...}` envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AirCareError {
    // === Request Errors ===
    #[error("{0}")]
    MissingParameter(String),

    #[error("Invalid '{param}' parameter: {value}")]
    InvalidParameter { param: String, value: String },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    // === Provider Errors ===
    /// Transport failure or non-success status; carries the provider's
    /// status text untouched.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    NoData(String),

    // === Storage Errors ===
    #[error("Failed to save history: {0}")]
    StoreWrite(String),

    #[error("Failed to read history: {0}")]
    StoreRead(String),

    // === Configuration Errors ===
    #[error("Missing {0}")]
    MissingCredential(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl AirCareError {
    /// `Missing '<name>' parameter`.
    pub fn missing_parameter(name: &str) -> Self {
        AirCareError::MissingParameter(format!("Missing '{}' parameter", name))
    }

    pub fn invalid_parameter(param: &str, value: impl Into<String>) -> Self {
        AirCareError::InvalidParameter {
            param: param.to_string(),
            value: value.into(),
        }
    }

    /// Short machine-readable name, used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AirCareError::MissingParameter(_) => "missing_parameter",
            AirCareError::InvalidParameter { .. } => "invalid_parameter",
            AirCareError::InvalidCoordinate(_) => "invalid_coordinate",
            AirCareError::NotFound(_) => "not_found",
            AirCareError::UnknownEndpoint(_) => "unknown_endpoint",
            AirCareError::Upstream(_) => "upstream_error",
            AirCareError::NoData(_) => "no_data",
            AirCareError::StoreWrite(_) => "store_write_error",
            AirCareError::StoreRead(_) => "store_read_error",
            AirCareError::MissingCredential(_) | AirCareError::Configuration(_) => {
                "configuration_error"
            }
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Configuration problems are server faults and unmatched routes are 404;
    /// everything raised inside a handler is reported as a bad request.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AirCareError::MissingCredential(_) | AirCareError::Configuration(_) => 500,
            AirCareError::UnknownEndpoint(_) => 404,
            _ => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = AirCareError::missing_parameter("q");
        assert_eq!(err.to_string(), "Missing 'q' parameter");
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AirCareError::MissingCredential("OPENWEATHER_APIKEY".into()).http_status_code(),
            500
        );
        assert_eq!(
            AirCareError::UnknownEndpoint("/nope".into()).http_status_code(),
            404
        );
        assert_eq!(AirCareError::NotFound("City not found".into()).http_status_code(), 400);
        assert_eq!(AirCareError::Upstream("Bad Request".into()).http_status_code(), 400);
        assert_eq!(AirCareError::StoreWrite("boom".into()).http_status_code(), 400);
    }

    #[test]
    fn test_upstream_message_is_verbatim() {
        let err = AirCareError::Upstream("Unauthorized".into());
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn test_credential_message() {
        let err = AirCareError::MissingCredential("OPENWEATHER_APIKEY".into());
        assert_eq!(err.to_string(), "Missing OPENWEATHER_APIKEY");
        assert_eq!(err.kind(), "configuration_error");
    }
}
