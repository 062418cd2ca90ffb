//! Fermi-Dirac distribution HTTP service binary.
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8000)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_NAME` - Name reported in logs, metrics and health probes
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint
//! - `FERMIDIRAC_MAX_POINTS`, `FERMIDIRAC_MAX_TEMPERATURE`,
//!   `FERMIDIRAC_MAX_SURFACE_CELLS` - Request limits

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use fermidirac_service::build_router;
use fermidirac_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("fermidirac");
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("failed to initialise logging: {e}");
    }

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional.
        tracing::warn!(error = %e, "continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let state = AppState::from_env(logging_config.service_name()).map_err(|e| {
        error!(error = %e, "invalid request limits");
        e
    })?;

    info!(
        service = state.service(),
        port,
        metrics = metrics_config.enabled,
        "starting Fermi-Dirac service"
    );

    let app = build_router(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
