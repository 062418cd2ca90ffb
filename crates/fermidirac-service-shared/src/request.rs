//! Request types and validation for HTTP endpoints.
//!
//! Field defaults follow the public API: a request with an empty body (or no
//! query string) evaluates the 300 K room-temperature curve over
//! `[-1, 2] eV` with μ = 0.5 eV.

use serde::{Deserialize, Serialize};

use fermidirac_lib::{EnergyGrid, Result as LibResult, Spacing, TemperatureAxis, TemperatureSet};

use crate::{ProblemDetails, RequestLimits};

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    /// Check every field against `limits`.
    ///
    /// The `request_id` populates the `instance` field of any returned problem.
    fn validate(&self, limits: &RequestLimits, request_id: &str)
        -> Result<(), Box<ProblemDetails>>;
}

fn default_temperature() -> f64 {
    300.0
}

fn default_mu() -> f64 {
    0.5
}

fn default_energy_min() -> f64 {
    -1.0
}

fn default_energy_max() -> f64 {
    2.0
}

fn default_points() -> usize {
    500
}

fn default_temperatures() -> Vec<f64> {
    vec![0.0, 100.0, 300.0, 1000.0, 3000.0]
}

fn default_energy_points() -> usize {
    200
}

fn default_temp_min() -> f64 {
    1.0
}

fn default_temp_max() -> f64 {
    5000.0
}

fn default_temp_points() -> usize {
    100
}

fn default_temp_scale() -> Spacing {
    Spacing::Log
}

/// Single-temperature curve parameters.
///
/// Used as the JSON body of `POST /api/v1/fermi-dirac` and as the query of
/// `GET /api/v1/derivative` and `GET /api/v1/export/csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FermiDiracRequest {
    /// Temperature in kelvin; 0 selects the exact step.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Chemical potential in eV.
    #[serde(default = "default_mu")]
    pub mu: f64,

    #[serde(default = "default_energy_min")]
    pub energy_min: f64,

    #[serde(default = "default_energy_max")]
    pub energy_max: f64,

    /// Number of energy grid points.
    #[serde(default = "default_points")]
    pub points: usize,
}

impl Default for FermiDiracRequest {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            mu: default_mu(),
            energy_min: default_energy_min(),
            energy_max: default_energy_max(),
            points: default_points(),
        }
    }
}

impl FermiDiracRequest {
    pub fn energy_grid(&self) -> LibResult<EnergyGrid> {
        EnergyGrid::linear(self.energy_min, self.energy_max, self.points)
    }
}

impl Validate for FermiDiracRequest {
    fn validate(
        &self,
        limits: &RequestLimits,
        request_id: &str,
    ) -> Result<(), Box<ProblemDetails>> {
        check_temperature("temperature", self.temperature, limits, request_id)?;
        check_mu(self.mu, limits, request_id)?;
        check_energy_range(self.energy_min, self.energy_max, limits, request_id)?;
        check_count(
            "points",
            self.points,
            limits.min_points,
            limits.max_points,
            request_id,
        )
    }
}

/// Query of `GET /api/v1/zero-temperature`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZeroTemperatureQuery {
    #[serde(default = "default_mu")]
    pub mu: f64,

    #[serde(default = "default_energy_min")]
    pub energy_min: f64,

    #[serde(default = "default_energy_max")]
    pub energy_max: f64,

    #[serde(default = "default_points")]
    pub points: usize,
}

impl ZeroTemperatureQuery {
    /// The same curve request pinned at T = 0.
    pub fn as_curve_request(&self) -> FermiDiracRequest {
        FermiDiracRequest {
            temperature: 0.0,
            mu: self.mu,
            energy_min: self.energy_min,
            energy_max: self.energy_max,
            points: self.points,
        }
    }
}

impl Validate for ZeroTemperatureQuery {
    fn validate(
        &self,
        limits: &RequestLimits,
        request_id: &str,
    ) -> Result<(), Box<ProblemDetails>> {
        self.as_curve_request().validate(limits, request_id)
    }
}

/// Body of `POST /api/v1/multi-temperature`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiTemperatureRequest {
    /// Temperatures in kelvin; sorted and de-duplicated before evaluation.
    #[serde(default = "default_temperatures")]
    pub temperatures: Vec<f64>,

    #[serde(default = "default_mu")]
    pub mu: f64,

    #[serde(default = "default_energy_min")]
    pub energy_min: f64,

    #[serde(default = "default_energy_max")]
    pub energy_max: f64,

    #[serde(default = "default_points")]
    pub points: usize,

    /// Attach classical comparison curves for every T > 0.
    #[serde(default)]
    pub include_maxwell_boltzmann: bool,
}

impl MultiTemperatureRequest {
    pub fn energy_grid(&self) -> LibResult<EnergyGrid> {
        EnergyGrid::linear(self.energy_min, self.energy_max, self.points)
    }

    /// Requested temperatures in ascending order without duplicates.
    pub fn temperature_set(&self) -> LibResult<TemperatureSet> {
        Ok(TemperatureSet::new(self.temperatures.clone())?.sorted_unique())
    }
}

impl Validate for MultiTemperatureRequest {
    fn validate(
        &self,
        limits: &RequestLimits,
        request_id: &str,
    ) -> Result<(), Box<ProblemDetails>> {
        if self.temperatures.is_empty() {
            return Err(Box::new(ProblemDetails::invalid_temperature(
                "The 'temperatures' field must contain at least one temperature",
                request_id,
            )));
        }
        if self.temperatures.len() > limits.max_temperatures {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'temperatures' field cannot contain more than {} temperatures",
                    limits.max_temperatures
                ),
                request_id,
            )));
        }
        for &temperature in &self.temperatures {
            check_temperature("temperatures", temperature, limits, request_id)?;
        }
        check_mu(self.mu, limits, request_id)?;
        check_energy_range(self.energy_min, self.energy_max, limits, request_id)?;
        check_count(
            "points",
            self.points,
            limits.min_points,
            limits.multi_points_limit(),
            request_id,
        )
    }
}

/// Body of `POST /api/v1/surface`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceRequest {
    #[serde(default = "default_mu")]
    pub mu: f64,

    #[serde(default = "default_energy_min")]
    pub energy_min: f64,

    #[serde(default = "default_energy_max")]
    pub energy_max: f64,

    #[serde(default = "default_energy_points")]
    pub energy_points: usize,

    #[serde(default = "default_temp_min")]
    pub temp_min: f64,

    #[serde(default = "default_temp_max")]
    pub temp_max: f64,

    #[serde(default = "default_temp_points")]
    pub temp_points: usize,

    /// `"linear"` or `"log"`.
    #[serde(default = "default_temp_scale")]
    pub temp_scale: Spacing,
}

impl Default for SurfaceRequest {
    fn default() -> Self {
        Self {
            mu: default_mu(),
            energy_min: default_energy_min(),
            energy_max: default_energy_max(),
            energy_points: default_energy_points(),
            temp_min: default_temp_min(),
            temp_max: default_temp_max(),
            temp_points: default_temp_points(),
            temp_scale: default_temp_scale(),
        }
    }
}

impl SurfaceRequest {
    pub fn energy_grid(&self) -> LibResult<EnergyGrid> {
        EnergyGrid::linear(self.energy_min, self.energy_max, self.energy_points)
    }

    pub fn temperature_axis(&self) -> LibResult<TemperatureAxis> {
        TemperatureAxis::new(self.temp_min, self.temp_max, self.temp_points, self.temp_scale)
    }

    /// Number of occupation values the surface will hold.
    pub fn cells(&self) -> usize {
        self.energy_points.saturating_mul(self.temp_points)
    }
}

impl Validate for SurfaceRequest {
    fn validate(
        &self,
        limits: &RequestLimits,
        request_id: &str,
    ) -> Result<(), Box<ProblemDetails>> {
        check_mu(self.mu, limits, request_id)?;
        check_energy_range(self.energy_min, self.energy_max, limits, request_id)?;
        check_count(
            "energy_points",
            self.energy_points,
            limits.min_points,
            limits.max_surface_energy_points,
            request_id,
        )?;
        check_count(
            "temp_points",
            self.temp_points,
            limits.min_points,
            limits.max_surface_temperature_points,
            request_id,
        )?;

        if !(limits.min_surface_temperature..).contains(&self.temp_min) {
            return Err(Box::new(ProblemDetails::invalid_temperature(
                format!(
                    "The 'temp_min' field must be at least {} K",
                    limits.min_surface_temperature
                ),
                request_id,
            )));
        }
        let ceiling = limits.surface_temperature_limit();
        if !(..=ceiling).contains(&self.temp_max) {
            return Err(Box::new(ProblemDetails::invalid_temperature(
                format!("The 'temp_max' field cannot exceed {ceiling} K"),
                request_id,
            )));
        }
        if self.temp_max <= self.temp_min {
            return Err(Box::new(ProblemDetails::invalid_range(
                format!(
                    "temp_max ({}) must be greater than temp_min ({})",
                    self.temp_max, self.temp_min
                ),
                request_id,
            )));
        }

        if self.cells() > limits.max_surface_cells {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "Surface of {} x {} points exceeds the limit of {} cells",
                    self.temp_points, self.energy_points, limits.max_surface_cells
                ),
                request_id,
            )));
        }

        Ok(())
    }
}

/// Query of `GET /api/v1/regime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeQuery {
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Fermi energy in eV; must be positive.
    pub fermi_energy: f64,
}

impl Validate for RegimeQuery {
    fn validate(
        &self,
        limits: &RequestLimits,
        request_id: &str,
    ) -> Result<(), Box<ProblemDetails>> {
        check_temperature("temperature", self.temperature, limits, request_id)?;
        if !(self.fermi_energy > 0.0 && self.fermi_energy.is_finite()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'fermi_energy' field must be a finite positive number",
                request_id,
            )));
        }
        Ok(())
    }
}

fn check_temperature(
    field: &str,
    temperature: f64,
    limits: &RequestLimits,
    request_id: &str,
) -> Result<(), Box<ProblemDetails>> {
    if !(0.0..=limits.max_temperature).contains(&temperature) {
        return Err(Box::new(ProblemDetails::invalid_temperature(
            format!(
                "The '{field}' field must be between 0 and {} K, got {temperature}",
                limits.max_temperature
            ),
            request_id,
        )));
    }
    Ok(())
}

fn check_mu(
    mu: f64,
    limits: &RequestLimits,
    request_id: &str,
) -> Result<(), Box<ProblemDetails>> {
    if !(-limits.max_abs_mu..=limits.max_abs_mu).contains(&mu) {
        return Err(Box::new(ProblemDetails::bad_request(
            format!(
                "The 'mu' field must be between -{0} and {0} eV, got {mu}",
                limits.max_abs_mu
            ),
            request_id,
        )));
    }
    Ok(())
}

fn check_energy_range(
    energy_min: f64,
    energy_max: f64,
    limits: &RequestLimits,
    request_id: &str,
) -> Result<(), Box<ProblemDetails>> {
    let bounds = -limits.max_abs_energy..=limits.max_abs_energy;
    for (field, value) in [("energy_min", energy_min), ("energy_max", energy_max)] {
        if !bounds.contains(&value) {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The '{field}' field must be between -{0} and {0} eV, got {value}",
                    limits.max_abs_energy
                ),
                request_id,
            )));
        }
    }
    if energy_max <= energy_min {
        return Err(Box::new(ProblemDetails::invalid_range(
            format!("energy_max ({energy_max}) must be greater than energy_min ({energy_min})"),
            request_id,
        )));
    }
    Ok(())
}

fn check_count(
    field: &str,
    value: usize,
    min: usize,
    max: usize,
    request_id: &str,
) -> Result<(), Box<ProblemDetails>> {
    if !(min..=max).contains(&value) {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{field}' field must be between {min} and {max}, got {value}"),
            request_id,
        )));
    }
    Ok(())
}
