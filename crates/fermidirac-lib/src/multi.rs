//! Occupation curves for several temperatures over a shared energy grid.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::curve::{evaluate_row, TemperatureCurve};
use crate::grid::{EnergyGrid, TemperatureSet};

/// Curves for every temperature of a [`TemperatureSet`], in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiCurve {
    pub energies: Vec<f64>,
    pub curves: Vec<TemperatureCurve>,
}

impl MultiCurve {
    /// Curve evaluated at exactly `temperature`, if present.
    pub fn curve_for(&self, temperature: f64) -> Option<&TemperatureCurve> {
        self.curves.iter().find(|c| c.temperature == temperature)
    }
}

/// Evaluate one curve per temperature, sharing `grid`.
///
/// Temperatures are independent of each other; with the `parallel` feature
/// they are evaluated on the rayon pool. Either way `curves[i]` corresponds to
/// `temperatures.as_slice()[i]`.
pub fn multi_curve(
    grid: &EnergyGrid,
    temperatures: &TemperatureSet,
    mu: f64,
    include_maxwell_boltzmann: bool,
) -> MultiCurve {
    let evaluate = |&temperature: &f64| evaluate_row(grid, temperature, mu, include_maxwell_boltzmann);

    #[cfg(not(feature = "parallel"))]
    let curves: Vec<TemperatureCurve> = temperatures.as_slice().iter().map(evaluate).collect();

    #[cfg(feature = "parallel")]
    let curves: Vec<TemperatureCurve> = temperatures.as_slice().par_iter().map(evaluate).collect();

    tracing::debug!(
        temperatures = curves.len(),
        points = grid.len(),
        "evaluated multi-temperature curves"
    );

    MultiCurve {
        energies: grid.as_slice().to_vec(),
        curves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_curve_preserves_input_order() {
        let grid = EnergyGrid::linear(-1.0, 2.0, 50).unwrap();
        let temperatures = TemperatureSet::new(vec![3000.0, 0.0, 300.0]).unwrap();
        let result = multi_curve(&grid, &temperatures, 0.5, false);

        let order: Vec<f64> = result.curves.iter().map(|c| c.temperature).collect();
        assert_eq!(order, vec![3000.0, 0.0, 300.0]);
        assert!(result.curves.iter().all(|c| c.occupation.len() == 50));
    }

    #[test]
    fn test_multi_curve_skips_mb_at_zero() {
        let grid = EnergyGrid::linear(-1.0, 2.0, 10).unwrap();
        let temperatures = TemperatureSet::new(vec![0.0, 500.0]).unwrap();
        let result = multi_curve(&grid, &temperatures, 0.5, true);

        assert!(result.curve_for(0.0).unwrap().maxwell_boltzmann.is_none());
        assert!(result.curve_for(500.0).unwrap().maxwell_boltzmann.is_some());
        assert!(result.curve_for(42.0).is_none());
    }
}
