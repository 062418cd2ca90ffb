//! Shared infrastructure for the Fermi-Dirac HTTP service.
//!
//! - [`AppState`] and [`RequestLimits`]: per-deployment bounds on request size
//! - [`health`]: liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 error responses
//! - [`ServiceResponse`]: wrapper for successful responses
//! - [`metrics`]: Prometheus recorder and domain metrics
//! - [`logging`]: JSON or text `tracing` output
//! - [`middleware`]: request ids and HTTP metrics
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; every number comes from `fermidirac-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse JSON body or query string                          │
//! │  - Validate against RequestLimits                           │
//! │  - Call fermidirac-lib evaluators                           │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![deny(warnings)]

pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{engine_self_check, health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_evaluation, record_evaluation_failed,
    record_grid_points, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_RANGE,
    PROBLEM_INVALID_REQUEST, PROBLEM_INVALID_TEMPERATURE,
};
pub use request::{
    FermiDiracRequest, MultiTemperatureRequest, RegimeQuery, SurfaceRequest, Validate,
    ZeroTemperatureQuery,
};
pub use response::ServiceResponse;
pub use state::{
    AppState, AppStateError, RequestLimits, ENV_MAX_POINTS, ENV_MAX_SURFACE_CELLS,
    ENV_MAX_TEMPERATURE,
};
