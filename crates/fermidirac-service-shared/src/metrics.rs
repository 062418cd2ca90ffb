//! Prometheus metrics for the Fermi-Dirac service.
//!
//! HTTP-level metrics are recorded by [`MetricsLayer`](crate::MetricsLayer);
//! this module installs the recorder, serves the exposition endpoint, and
//! provides helpers for the domain metrics:
//!
//! - `fermidirac_evaluations_total{kind, service}`
//! - `fermidirac_evaluations_failed_total{kind, reason, service}`
//! - `fermidirac_grid_points{kind}` (histogram of evaluated values per request)

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the exposition format.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` and `METRICS_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "off"))
            .unwrap_or(defaults.enabled);
        let path = lookup("METRICS_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| p.starts_with('/') && p.len() > 1)
            .unwrap_or(defaults.path);

        Self { enabled, path }
    }
}

#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the global Prometheus recorder.
///
/// Call once at startup, before anything is recorded.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Handle of the installed recorder, if any.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler rendering the Prometheus exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Count a successful evaluation of `kind` (e.g. `curve`, `surface`).
pub fn record_evaluation(kind: &'static str, service: &str) {
    metrics::counter!(
        "fermidirac_evaluations_total",
        "kind" => kind,
        "service" => service.to_string()
    )
    .increment(1);
}

/// Count a rejected or failed evaluation.
///
/// `reason` is a short label such as `validation_error` or `internal_error`.
pub fn record_evaluation_failed(kind: &'static str, reason: &'static str, service: &str) {
    metrics::counter!(
        "fermidirac_evaluations_failed_total",
        "kind" => kind,
        "reason" => reason,
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record how many occupation values a request produced.
pub fn record_grid_points(points: usize, kind: &'static str) {
    metrics::histogram!("fermidirac_grid_points", "kind" => kind).record(points as f64);
}
