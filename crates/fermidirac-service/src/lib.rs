//! Fermi-Dirac distribution HTTP service.
//!
//! # Endpoints
//!
//! - `GET /` - Service name, version and endpoint list
//! - `POST /api/v1/fermi-dirac` - Occupation curve at one temperature
//! - `POST /api/v1/multi-temperature` - Curves for several temperatures
//! - `GET /api/v1/zero-temperature` - Exact T = 0 step
//! - `POST /api/v1/surface` - Occupation surface f(E, T)
//! - `GET /api/v1/derivative` - df/dE over an energy grid
//! - `GET /api/v1/regime` - Degenerate / intermediate / classical classification
//! - `GET /api/v1/physics-info` - Constants, equation and regime descriptions
//! - `GET /api/v1/export/csv` - A curve rendered as CSV
//! - `GET /metrics` - Prometheus metrics endpoint (path configurable)
//! - `GET /health/live`, `GET /health/ready` - Kubernetes probes

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use fermidirac_service_shared::{
    health_live, health_ready, metrics_handler, AppState, MetricsConfig, MetricsLayer,
};

/// Assemble the full router for `state`.
///
/// The metrics route is mounted at `metrics.path` when metrics are enabled.
pub fn build_router(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1/fermi-dirac", post(handlers::fermi_dirac))
        .route("/api/v1/multi-temperature", post(handlers::multi_temperature))
        .route("/api/v1/zero-temperature", get(handlers::zero_temperature))
        .route("/api/v1/surface", post(handlers::surface))
        .route("/api/v1/derivative", get(handlers::derivative))
        .route("/api/v1/regime", get(handlers::regime))
        .route("/api/v1/physics-info", get(handlers::physics))
        .route("/api/v1/export/csv", get(handlers::export_csv))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(MetricsLayer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
