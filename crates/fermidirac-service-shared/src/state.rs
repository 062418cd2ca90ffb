//! Application state and request limits.
//!
//! The engine is stateless, so the only state a handler needs is the set of
//! limits requests are validated against plus some identification for health
//! probes. Limits default to the values of the public API and can be tightened
//! or relaxed per deployment through environment variables.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Environment variable overriding [`RequestLimits::max_points`].
pub const ENV_MAX_POINTS: &str = "FERMIDIRAC_MAX_POINTS";

/// Environment variable overriding [`RequestLimits::max_temperature`].
pub const ENV_MAX_TEMPERATURE: &str = "FERMIDIRAC_MAX_TEMPERATURE";

/// Environment variable overriding [`RequestLimits::max_surface_cells`].
pub const ENV_MAX_SURFACE_CELLS: &str = "FERMIDIRAC_MAX_SURFACE_CELLS";

/// Error during application state initialization.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// A limit variable was set but could not be parsed or was out of range.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidLimit {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Bounds enforced on every request before the engine is called.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLimits {
    /// Highest accepted temperature (K).
    pub max_temperature: f64,
    /// Largest accepted |μ| (eV).
    pub max_abs_mu: f64,
    /// Largest accepted |E| for grid bounds (eV).
    pub max_abs_energy: f64,
    /// Smallest grid any endpoint accepts.
    pub min_points: usize,
    /// Largest single-curve grid.
    pub max_points: usize,
    /// Largest grid for multi-temperature requests.
    pub max_multi_points: usize,
    /// Most temperatures in a multi-temperature request.
    pub max_temperatures: usize,
    /// Largest energy axis of a surface.
    pub max_surface_energy_points: usize,
    /// Largest temperature axis of a surface.
    pub max_surface_temperature_points: usize,
    /// Lowest accepted surface `temp_min` (K).
    pub min_surface_temperature: f64,
    /// Largest `energy_points × temp_points` product.
    pub max_surface_cells: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_temperature: 1e6,
            max_abs_mu: 10.0,
            max_abs_energy: 100.0,
            min_points: 10,
            max_points: 10_000,
            max_multi_points: 5_000,
            max_temperatures: 20,
            max_surface_energy_points: 1_000,
            max_surface_temperature_points: 500,
            min_surface_temperature: 0.1,
            max_surface_cells: 500_000,
        }
    }
}

impl RequestLimits {
    /// Defaults with overrides read from the process environment.
    pub fn from_env() -> Result<Self, AppStateError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides read through `lookup`.
    ///
    /// Unset variables keep their default; set variables must parse and be
    /// consistent with the fixed lower bounds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppStateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut limits = Self::default();

        if let Some(raw) = lookup(ENV_MAX_POINTS) {
            limits.max_points = parse_count(ENV_MAX_POINTS, &raw, limits.min_points)?;
        }
        if let Some(raw) = lookup(ENV_MAX_TEMPERATURE) {
            limits.max_temperature = parse_positive(ENV_MAX_TEMPERATURE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_SURFACE_CELLS) {
            let minimum = limits.min_points * limits.min_points;
            limits.max_surface_cells = parse_count(ENV_MAX_SURFACE_CELLS, &raw, minimum)?;
        }

        Ok(limits)
    }

    /// Grid size ceiling for multi-temperature requests.
    ///
    /// Never exceeds the single-curve ceiling.
    pub fn multi_points_limit(&self) -> usize {
        self.max_multi_points.min(self.max_points)
    }

    /// Upper temperature bound of surface axes.
    pub fn surface_temperature_limit(&self) -> f64 {
        self.max_temperature
    }
}

fn parse_count(name: &'static str, raw: &str, minimum: usize) -> Result<usize, AppStateError> {
    let value: usize = raw.trim().parse().map_err(|e| AppStateError::InvalidLimit {
        name,
        value: raw.to_string(),
        reason: format!("{e}"),
    })?;
    if value < minimum {
        return Err(AppStateError::InvalidLimit {
            name,
            value: raw.to_string(),
            reason: format!("must be at least {minimum}"),
        });
    }
    Ok(value)
}

fn parse_positive(name: &'static str, raw: &str) -> Result<f64, AppStateError> {
    let value: f64 = raw.trim().parse().map_err(|e| AppStateError::InvalidLimit {
        name,
        value: raw.to_string(),
        reason: format!("{e}"),
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AppStateError::InvalidLimit {
            name,
            value: raw.to_string(),
            reason: "must be a finite positive number".to_string(),
        });
    }
    Ok(value)
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable; share it via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: String,
    limits: RequestLimits,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: impl Into<String>, limits: RequestLimits) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service: service.into(),
                limits,
                started_at: Utc::now(),
            }),
        }
    }

    /// State for `service` with limits taken from the environment.
    pub fn from_env(service: impl Into<String>) -> Result<Self, AppStateError> {
        let limits = RequestLimits::from_env()?;
        tracing::info!(
            max_points = limits.max_points,
            max_temperature = limits.max_temperature,
            max_surface_cells = limits.max_surface_cells,
            "request limits configured"
        );
        Ok(Self::new(service, limits))
    }

    pub fn service(&self) -> &str {
        &self.inner.service
    }

    pub fn limits(&self) -> &RequestLimits {
        &self.inner.limits
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.inner.service)
            .field("max_points", &self.inner.limits.max_points)
            .field("started_at", &self.inner.started_at)
            .finish()
    }
}
