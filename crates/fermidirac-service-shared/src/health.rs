//! Liveness and readiness probes.
//!
//! Readiness runs a tiny self-check against the engine: the occupation at
//! E = μ must be exactly one half and the zero-temperature step must be sharp.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use fermidirac_lib::occupation;

use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` or `"not_ready: <reason>"`.
    pub status: String,
    pub service: String,
    pub version: String,

    /// RFC 3339 start time (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    /// Largest single-curve grid accepted (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<usize>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            started_at: None,
            max_points: None,
        }
    }

    pub fn ready(state: &AppState, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: state.service().to_string(),
            version: version.to_string(),
            started_at: Some(state.started_at().to_rfc3339()),
            max_points: Some(state.limits().max_points),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {reason}"),
            service: service.to_string(),
            version: version.to_string(),
            started_at: None,
            max_points: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// `true` if the evaluator reproduces its fixed points.
pub fn engine_self_check() -> bool {
    occupation(0.5, 300.0, 0.5) == 0.5
        && occupation(0.4, 0.0, 0.5) == 1.0
        && occupation(0.6, 0.0, 0.5) == 0.0
}

/// `GET /health/live`: 200 whenever the process is serving.
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service(), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`: 200 once the engine self-check passes, 503 otherwise.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let version = env!("CARGO_PKG_VERSION");

    if !engine_self_check() {
        tracing::error!("engine self-check failed");
        let status = HealthStatus::not_ready(state.service(), version, "engine self-check failed");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    (StatusCode::OK, Json(HealthStatus::ready(&state, version))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestLimits;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("fermidirac", "1.0.0");
        assert!(status.is_ok());
        assert!(status.started_at.is_none());
    }

    #[test]
    fn test_health_status_ready_reports_limits() {
        let state = AppState::new("fermidirac", RequestLimits::default());
        let status = HealthStatus::ready(&state, "1.0.0");
        assert!(status.is_ok());
        assert_eq!(status.max_points, Some(10_000));
        assert!(status.started_at.unwrap().contains('T'));
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("fermidirac", "1.0.0", "warming up");
        assert!(!status.is_ok());
        assert!(status.status.contains("warming up"));
    }

    #[test]
    fn test_health_status_serialization_skips_empty() {
        let json = serde_json::to_string(&HealthStatus::alive("fermidirac", "0.1.0")).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("max_points"));
    }

    #[test]
    fn test_engine_self_check_passes() {
        assert!(engine_self_check());
    }
}
