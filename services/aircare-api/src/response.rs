//! Response envelope.
//!
//! Every dispatched response, success or failure, carries the same CORS and
//! content-type headers and a JSON body.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use aircare_common::AirCareError;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "OPTIONS,GET";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A status code and serialized JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Serialize `body` with the given status. A body that fails to
    /// serialize becomes a 500 error envelope.
    pub fn build<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status, body },
            Err(e) => {
                error!(error = %e, "Failed to serialize response body");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({ "error": format!("Failed to serialize response: {}", e) })
                        .to_string(),
                }
            }
        }
    }

    pub fn ok<T: Serialize>(body: &T) -> Self {
        Self::build(StatusCode::OK, body)
    }

    /// `{"error": "<message>"}` with the status the error maps to.
    pub fn error(err: &AirCareError) -> Self {
        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::build(status, &json!({ "error": err.to_string() }))
    }

    /// CORS preflight: 204 and no body.
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: String::new(),
        }
    }

    /// Parse the body back into JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_JSON),
        );
        response
    }
}
