//! Response wrapper for successful HTTP responses.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful payload with content type metadata, mirroring [`ProblemDetails`](crate::ProblemDetails).
///
/// The payload's fields are flattened into the top-level JSON object.
///
/// # Example
///
/// ```
/// use fermidirac_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Width {
///     temperature: f64,
///     thermal_width: f64,
/// }
///
/// let response = ServiceResponse::new(Width { temperature: 300.0, thermal_width: 0.103 })
///     .with_request_id("req-1");
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["temperature"], 300.0);
/// assert_eq!(json["request_id"], "req-1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    /// Content type of the payload.
    pub content_type: String,

    /// Identifier of the request that produced this response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, Json(&self)).into_response();
        if let Some(id) = self
            .request_id
            .as_deref()
            .and_then(|id| HeaderValue::from_str(id).ok())
        {
            response.headers_mut().insert("x-request-id", id);
        }
        response
    }
}
