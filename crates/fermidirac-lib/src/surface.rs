//! Two-dimensional occupation surface f(E, T) for heatmaps.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::curve::evaluate_row;
use crate::error::Result;
use crate::grid::{EnergyGrid, Spacing, TemperatureAxis};

/// Occupation matrix indexed `[temperature_index][energy_index]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub energies: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub occupation: Vec<Vec<f64>>,
}

impl Surface {
    /// `(rows, columns)`, i.e. `(temperatures, energies)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.temperatures.len(), self.energies.len())
    }

    /// Occupation at a grid cell.
    pub fn get(&self, temperature_index: usize, energy_index: usize) -> Option<f64> {
        self.occupation
            .get(temperature_index)
            .and_then(|row| row.get(energy_index))
            .copied()
    }
}

/// Build a temperature axis from bounds and evaluate the surface over it.
///
/// # Errors
///
/// Returns an error if the temperature bounds or count cannot form a strictly
/// increasing axis (see [`TemperatureAxis::new`]). No evaluation happens in
/// that case.
///
/// # Examples
///
/// ```
/// use fermidirac_lib::{surface, EnergyGrid, Spacing};
///
/// let grid = EnergyGrid::linear(-1.0, 2.0, 50).unwrap();
/// let result = surface(&grid, 1.0, 5000.0, 30, Spacing::Log, 0.5).unwrap();
/// assert_eq!(result.shape(), (30, 50));
/// ```
pub fn surface(
    grid: &EnergyGrid,
    temp_min: f64,
    temp_max: f64,
    temp_count: usize,
    spacing: Spacing,
    mu: f64,
) -> Result<Surface> {
    let axis = TemperatureAxis::new(temp_min, temp_max, temp_count, spacing)?;
    Ok(surface_on_axis(grid, axis, mu))
}

/// Evaluate one occupation row per temperature of `axis`.
pub fn surface_on_axis(grid: &EnergyGrid, axis: TemperatureAxis, mu: f64) -> Surface {
    let evaluate = |&temperature: &f64| evaluate_row(grid, temperature, mu, false).occupation;

    #[cfg(not(feature = "parallel"))]
    let occupation: Vec<Vec<f64>> = axis.as_slice().iter().map(evaluate).collect();

    #[cfg(feature = "parallel")]
    let occupation: Vec<Vec<f64>> = axis.as_slice().par_iter().map(evaluate).collect();

    tracing::debug!(
        rows = occupation.len(),
        columns = grid.len(),
        spacing = %axis.spacing(),
        "evaluated occupation surface"
    );

    Surface {
        energies: grid.as_slice().to_vec(),
        temperatures: axis.into_vec(),
        occupation,
    }
}
