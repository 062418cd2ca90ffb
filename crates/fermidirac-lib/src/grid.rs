//! Energy grids, temperature sets and temperature axes.
//!
//! These types are the validated inputs of the evaluators. Constructing one
//! is the only fallible step of a computation: once a grid exists it is known
//! to be finite, strictly increasing and at least [`MIN_GRID_POINTS`] long.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{LOG_TEMPERATURE_FLOOR, MIN_GRID_POINTS};
use crate::error::{Error, Result};

/// Spacing of generated grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Uniform steps between the bounds.
    #[default]
    Linear,
    /// Uniform steps in log10-space between the bounds.
    #[serde(alias = "logarithmic")]
    Log,
}

impl Spacing {
    /// Wire name of the spacing (`"linear"` or `"log"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Spacing::Linear => "linear",
            Spacing::Log => "log",
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Spacing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" => Ok(Spacing::Linear),
            "log" | "logarithmic" => Ok(Spacing::Log),
            _ => Err(Error::UnknownSpacing {
                value: s.to_string(),
            }),
        }
    }
}

/// Ordered, strictly increasing sequence of energies in eV.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnergyGrid {
    values: Vec<f64>,
}

impl EnergyGrid {
    /// Uniformly spaced grid from `min` to `max` inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * `min` or `max` is not finite, or `min >= max`
    /// * `points` is less than 2
    ///
    /// # Examples
    ///
    /// ```
    /// use fermidirac_lib::EnergyGrid;
    ///
    /// let grid = EnergyGrid::linear(-1.0, 2.0, 7).unwrap();
    /// assert_eq!(grid.as_slice(), &[-1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0]);
    /// ```
    pub fn linear(min: f64, max: f64, points: usize) -> Result<Self> {
        Self::new(min, max, points, Spacing::Linear)
    }

    /// Grid from `min` to `max` inclusive with the requested spacing.
    ///
    /// Logarithmic spacing additionally requires `min > 0`.
    pub fn new(min: f64, max: f64, points: usize, spacing: Spacing) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(Error::InvalidRange { min, max });
        }
        check_point_count(points)?;

        let values = match spacing {
            Spacing::Linear => linspace(min, max, points),
            Spacing::Log => {
                if min <= 0.0 {
                    return Err(Error::NonPositiveLogRange { min });
                }
                logspace(min, max, points)
            }
        };

        if let Some(index) = first_unordered(&values) {
            // Only reachable when the step underflows for a huge point count.
            tracing::debug!(min, max, points, index, "generated energy grid collapsed");
            return Err(Error::InvalidRange { min, max });
        }

        Ok(Self { values })
    }

    /// Wrap an explicit list of energies.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 values are supplied, or if any value is
    /// non-finite or not strictly greater than its predecessor.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        check_point_count(values.len())?;
        if let Some(index) = first_unordered(&values) {
            return Err(Error::UnorderedEnergies { index });
        }
        Ok(Self { values })
    }

    /// Number of energies in the grid.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; grids hold at least two points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lowest energy.
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Highest energy.
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Temperatures (K) to evaluate as independent curves, in caller order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemperatureSet {
    values: Vec<f64>,
}

impl TemperatureSet {
    /// Validate a list of temperatures, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any temperature is negative or
    /// not finite.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyTemperatureSet);
        }
        for &temperature in &values {
            validate_temperature(temperature)?;
        }
        Ok(Self { values })
    }

    /// Sort ascending and drop duplicate temperatures.
    pub fn sorted_unique(mut self) -> Self {
        self.values.sort_by(f64::total_cmp);
        self.values.dedup();
        self
    }

    /// True if the set contains the T = 0 step function.
    pub fn contains_zero(&self) -> bool {
        self.values.iter().any(|&t| t == 0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Strictly increasing temperature axis of a [`Surface`](crate::Surface).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureAxis {
    values: Vec<f64>,
    spacing: Spacing,
}

impl TemperatureAxis {
    /// Build a temperature axis from `min` to `max` with `count` points.
    ///
    /// A logarithmic axis starts at `max(min, 0.1 K)` so that `log10(0)` is
    /// never taken. A linear axis may start at exactly 0 K.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or not finite, if `count`
    /// is less than 2, or if the effective lower bound is not below `max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fermidirac_lib::{Spacing, TemperatureAxis};
    ///
    /// let axis = TemperatureAxis::new(0.0, 1000.0, 4, Spacing::Log).unwrap();
    /// assert_eq!(axis.as_slice().first(), Some(&0.1));
    /// assert_eq!(axis.as_slice().last(), Some(&1000.0));
    /// ```
    pub fn new(min: f64, max: f64, count: usize, spacing: Spacing) -> Result<Self> {
        validate_temperature(min)?;
        validate_temperature(max)?;
        check_point_count(count)?;

        let lower = match spacing {
            Spacing::Linear => min,
            Spacing::Log => min.max(LOG_TEMPERATURE_FLOOR),
        };
        if lower >= max {
            return Err(Error::InvalidTemperatureRange { min, max });
        }

        let values = match spacing {
            Spacing::Linear => linspace(lower, max, count),
            Spacing::Log => logspace(lower, max, count),
        };
        if first_unordered(&values).is_some() {
            return Err(Error::InvalidTemperatureRange { min, max });
        }

        Ok(Self { values, spacing })
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Reject negative and non-finite temperatures.
pub fn validate_temperature(temperature: f64) -> Result<f64> {
    if temperature.is_finite() && temperature >= 0.0 {
        Ok(temperature)
    } else {
        Err(Error::InvalidTemperature { temperature })
    }
}

/// Reject non-finite chemical potentials.
pub fn validate_chemical_potential(mu: f64) -> Result<f64> {
    if mu.is_finite() {
        Ok(mu)
    } else {
        Err(Error::InvalidChemicalPotential { mu })
    }
}

fn check_point_count(points: usize) -> Result<()> {
    if points < MIN_GRID_POINTS {
        return Err(Error::InvalidPointCount {
            points,
            minimum: MIN_GRID_POINTS,
        });
    }
    Ok(())
}

/// Index of the first value that is non-finite or not above its predecessor.
fn first_unordered(values: &[f64]) -> Option<usize> {
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Some(index);
    }
    values
        .windows(2)
        .position(|pair| pair[1] <= pair[0])
        .map(|i| i + 1)
}

// Endpoints are pinned to the exact bounds so that `max` never drifts by an ulp.
fn linspace(min: f64, max: f64, points: usize) -> Vec<f64> {
    let last = points - 1;
    let step = (max - min) / last as f64;
    (0..points)
        .map(|i| if i == last { max } else { min + step * i as f64 })
        .collect()
}

fn logspace(min: f64, max: f64, points: usize) -> Vec<f64> {
    let last = points - 1;
    let (lo, hi) = (min.log10(), max.log10());
    let step = (hi - lo) / last as f64;
    (0..points)
        .map(|i| match i {
            0 => min,
            i if i == last => max,
            i => 10f64.powf(lo + step * i as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_grid_endpoints() {
        let grid = EnergyGrid::linear(-1.0, 2.0, 500).unwrap();
        assert_eq!(grid.len(), 500);
        assert_eq!(grid.min(), -1.0);
        assert_eq!(grid.max(), 2.0);
    }

    #[test]
    fn test_linear_grid_rejects_inverted_range() {
        let err = EnergyGrid::linear(2.0, -1.0, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));

        let err = EnergyGrid::linear(1.0, 1.0, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn test_grid_rejects_single_point() {
        let err = EnergyGrid::linear(0.0, 1.0, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPointCount {
                points: 1,
                minimum: 2
            }
        ));
    }

    #[test]
    fn test_grid_rejects_non_finite_bounds() {
        assert!(EnergyGrid::linear(f64::NAN, 1.0, 10).is_err());
        assert!(EnergyGrid::linear(0.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_log_grid_requires_positive_minimum() {
        let err = EnergyGrid::new(0.0, 1.0, 10, Spacing::Log).unwrap_err();
        assert!(matches!(err, Error::NonPositiveLogRange { .. }));

        let grid = EnergyGrid::new(0.01, 10.0, 4, Spacing::Log).unwrap();
        let values = grid.as_slice();
        assert_eq!(values[0], 0.01);
        assert!((values[1] - 0.1).abs() < 1e-12);
        assert!((values[2] - 1.0).abs() < 1e-12);
        assert_eq!(values[3], 10.0);
    }

    #[test]
    fn test_from_values_rejects_unordered() {
        let err = EnergyGrid::from_values(vec![0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::UnorderedEnergies { index: 2 }));

        let err = EnergyGrid::from_values(vec![0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, Error::UnorderedEnergies { index: 1 }));
    }

    #[test]
    fn test_temperature_set_rejects_negative() {
        let err = TemperatureSet::new(vec![0.0, -1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidTemperature { .. }));
        assert!(matches!(
            TemperatureSet::new(vec![]).unwrap_err(),
            Error::EmptyTemperatureSet
        ));
    }

    #[test]
    fn test_temperature_set_sorted_unique() {
        let set = TemperatureSet::new(vec![300.0, 0.0, 100.0, 300.0])
            .unwrap()
            .sorted_unique();
        assert_eq!(set.as_slice(), &[0.0, 100.0, 300.0]);
        assert!(set.contains_zero());
    }

    #[test]
    fn test_temperature_axis_log_floor() {
        let axis = TemperatureAxis::new(0.0, 5000.0, 30, Spacing::Log).unwrap();
        assert_eq!(axis.as_slice()[0], LOG_TEMPERATURE_FLOOR);
        assert_eq!(axis.len(), 30);
        assert!(axis.as_slice().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_temperature_axis_linear_may_start_at_zero() {
        let axis = TemperatureAxis::new(0.0, 100.0, 5, Spacing::Linear).unwrap();
        assert_eq!(axis.as_slice(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(axis.spacing(), Spacing::Linear);
    }

    #[test]
    fn test_temperature_axis_rejects_collapsed_range() {
        let err = TemperatureAxis::new(0.0, 0.05, 10, Spacing::Log).unwrap_err();
        assert!(matches!(err, Error::InvalidTemperatureRange { .. }));

        let err = TemperatureAxis::new(10.0, 10.0, 10, Spacing::Linear).unwrap_err();
        assert!(matches!(err, Error::InvalidTemperatureRange { .. }));
    }

    #[test]
    fn test_spacing_parse_and_serde() {
        assert_eq!("LOG".parse::<Spacing>().unwrap(), Spacing::Log);
        assert_eq!("linear".parse::<Spacing>().unwrap(), Spacing::Linear);
        assert!("cubic".parse::<Spacing>().is_err());

        assert_eq!(serde_json::to_string(&Spacing::Log).unwrap(), "\"log\"");
        let parsed: Spacing = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, Spacing::Linear);
    }
}
