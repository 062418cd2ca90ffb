//! Occupation curves over an energy grid for a single temperature.

use serde::Serialize;

use crate::grid::EnergyGrid;
use crate::occupation::{
    is_guarded, maxwell_boltzmann, occupation, reduced_energy, thermal_energy,
};

/// Occupation values for one temperature, aligned with a shared energy grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureCurve {
    /// Generating temperature (K).
    pub temperature: f64,
    /// Fermi-Dirac occupation per grid energy, in `[0, 1]`.
    pub occupation: Vec<f64>,
    /// Classical comparison per grid energy; absent at T = 0 or when not requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxwell_boltzmann: Option<Vec<f64>>,
}

/// A [`TemperatureCurve`] together with the energies it was evaluated on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupationCurve {
    pub energies: Vec<f64>,
    #[serde(flatten)]
    pub curve: TemperatureCurve,
}

impl OccupationCurve {
    pub fn temperature(&self) -> f64 {
        self.curve.temperature
    }

    pub fn occupation(&self) -> &[f64] {
        &self.curve.occupation
    }

    pub fn maxwell_boltzmann(&self) -> Option<&[f64]> {
        self.curve.maxwell_boltzmann.as_deref()
    }

    /// `(energy, occupation)` pairs in ascending energy order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies
            .iter()
            .copied()
            .zip(self.curve.occupation.iter().copied())
    }
}

/// Evaluate the occupation across `grid` at a single temperature.
///
/// With `include_maxwell_boltzmann` set, the classical comparison is computed
/// as well, except at `T == 0` where it is undefined and left out.
///
/// # Examples
///
/// ```
/// use fermidirac_lib::{curve, EnergyGrid};
///
/// let grid = EnergyGrid::linear(-1.0, 2.0, 7).unwrap();
/// let result = curve(&grid, 0.0, 0.5, true);
/// assert_eq!(result.occupation(), &[1.0, 1.0, 1.0, 0.5, 0.0, 0.0, 0.0]);
/// assert!(result.maxwell_boltzmann().is_none());
/// ```
pub fn curve(
    grid: &EnergyGrid,
    temperature: f64,
    mu: f64,
    include_maxwell_boltzmann: bool,
) -> OccupationCurve {
    OccupationCurve {
        energies: grid.as_slice().to_vec(),
        curve: evaluate_row(grid, temperature, mu, include_maxwell_boltzmann),
    }
}

/// Evaluate one temperature row without copying the energy grid.
pub fn evaluate_row(
    grid: &EnergyGrid,
    temperature: f64,
    mu: f64,
    include_maxwell_boltzmann: bool,
) -> TemperatureCurve {
    let occupation: Vec<f64> = grid
        .iter()
        .map(|energy| occupation(energy, temperature, mu))
        .collect();

    let thermal = thermal_energy(temperature) > 0.0;
    let maxwell_boltzmann = if include_maxwell_boltzmann && thermal {
        Some(
            grid.iter()
                .filter_map(|energy| maxwell_boltzmann(energy, temperature, mu))
                .collect(),
        )
    } else {
        None
    };

    if thermal && tracing::enabled!(tracing::Level::DEBUG) {
        let guarded = grid
            .iter()
            .filter(|&energy| is_guarded(reduced_energy(energy, temperature, mu)))
            .count();
        if guarded > 0 {
            tracing::debug!(
                temperature,
                mu,
                guarded,
                points = grid.len(),
                "occupation saturated by overflow guard"
            );
        }
    }

    TemperatureCurve {
        temperature,
        occupation,
        maxwell_boltzmann,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> EnergyGrid {
        EnergyGrid::from_values(vec![-1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0]).unwrap()
    }

    #[test]
    fn test_curve_preserves_grid_order() {
        let result = curve(&grid(), 300.0, 0.5, false);
        assert_eq!(result.energies, grid().as_slice());
        assert_eq!(result.occupation().len(), 7);
        assert_eq!(result.temperature(), 300.0);
    }

    #[test]
    fn test_curve_maxwell_boltzmann_lengths() {
        let result = curve(&grid(), 1000.0, 0.5, true);
        let mb = result.maxwell_boltzmann().expect("requested at T > 0");
        assert_eq!(mb.len(), result.occupation().len());
        assert!(mb.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn test_curve_subnormal_temperature_omits_maxwell_boltzmann() {
        let grid = EnergyGrid::linear(-1.0, 2.0, 7).unwrap();
        let result = curve(&grid, 1e-320, 0.5, true);
        assert_eq!(result.occupation(), &[1.0, 1.0, 1.0, 0.5, 0.0, 0.0, 0.0]);
        assert!(result.maxwell_boltzmann().is_none());
    }

    #[test]
    fn test_curve_without_maxwell_boltzmann() {
        let result = curve(&grid(), 1000.0, 0.5, false);
        assert!(result.maxwell_boltzmann().is_none());
    }

    #[test]
    fn test_points_pairs_energy_with_occupation() {
        let result = curve(&grid(), 0.0, 0.5, false);
        let points: Vec<_> = result.points().collect();
        assert_eq!(points[3], (0.5, 0.5));
        assert_eq!(points[0], (-1.0, 1.0));
    }

    #[test]
    fn test_curve_serialization_omits_missing_mb() {
        let result = curve(&grid(), 0.0, 0.5, true);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"energies\":["));
        assert!(json.contains("\"temperature\":0.0"));
        assert!(!json.contains("maxwell_boltzmann"));
    }
}
