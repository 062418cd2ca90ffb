//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Every error the service returns uses this shape, with the
//! `application/problem+json` content type.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use fermidirac_lib::Error as LibError;

/// Problem type URI for malformed or out-of-bounds request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for energy or temperature ranges that cannot form a grid.
pub const PROBLEM_INVALID_RANGE: &str = "/problems/invalid-range";

/// Problem type URI for negative or non-finite temperatures.
pub const PROBLEM_INVALID_TEMPERATURE: &str = "/problems/invalid-temperature";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use fermidirac_service_shared::{ProblemDetails, PROBLEM_INVALID_RANGE};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(PROBLEM_INVALID_RANGE, "Invalid Range", StatusCode::BAD_REQUEST)
///     .with_detail("energy_max (-2) must be greater than energy_min (-1)")
///     .with_request_id("req-12345");
/// assert_eq!(problem.status, 400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier of the failing call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Always `application/problem+json`.
    pub content_type: String,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for a parameter outside its accepted bounds.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 400 for a range that cannot be turned into a grid or axis.
    pub fn invalid_range(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_INVALID_RANGE, "Invalid Range", StatusCode::BAD_REQUEST)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// 400 for a temperature the engine rejects.
    pub fn invalid_temperature(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_TEMPERATURE,
            "Invalid Temperature",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.title, detail),
            None => f.write_str(&self.title),
        }
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Convert a library error into a problem for `request_id`.
///
/// Validation failures become 400s; serialization failures become 500s.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::InvalidRange { .. }
        | LibError::NonPositiveLogRange { .. }
        | LibError::InvalidPointCount { .. }
        | LibError::UnorderedEnergies { .. }
        | LibError::InvalidTemperatureRange { .. } => {
            ProblemDetails::invalid_range(error.to_string(), request_id)
        }
        LibError::InvalidTemperature { .. }
        | LibError::EmptyTemperatureSet
        | LibError::InvalidFermiTemperature { .. } => {
            ProblemDetails::invalid_temperature(error.to_string(), request_id)
        }
        _ if error.is_validation() => ProblemDetails::bad_request(error.to_string(), request_id),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
