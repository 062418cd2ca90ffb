//! Quantities derived analytically from the occupation function.

use serde::Serialize;

use crate::constants::{DERIVATIVE_CUTOFF, K_BOLTZMANN_EV, THERMAL_WIDTH_FACTOR};
use crate::grid::EnergyGrid;
use crate::occupation::{is_well_formed, thermal_energy};

/// Energy window (eV) over which the step is smeared: `4·k_B·T`.
///
/// # Examples
///
/// ```
/// use fermidirac_lib::thermal_width;
///
/// assert!((thermal_width(300.0) - 0.10341).abs() < 1e-5);
/// assert_eq!(thermal_width(0.0), 0.0);
/// ```
pub fn thermal_width(temperature: f64) -> f64 {
    THERMAL_WIDTH_FACTOR * K_BOLTZMANN_EV * temperature
}

/// Slope `df/dE` in 1/eV.
///
/// For `T > 0` this is `-f·(1 - f)/(k_B·T)`, evaluated as the equivalent
/// `-sech²(x/2) / (4·k_B·T)` so that neither tail loses precision to
/// cancellation in `1 - f`. For `|x| > 1400` the result is exactly zero.
///
/// When `k_B·T == 0` the slope is zero away from μ and a Dirac delta at μ,
/// which has no finite value: that point is `None`. Temperatures so small
/// that the peak overflows are reported the same way.
///
/// # Examples
///
/// ```
/// use fermidirac_lib::derivative;
///
/// assert_eq!(derivative(0.5, 0.0, 0.5), None);
/// assert_eq!(derivative(0.2, 0.0, 0.5), Some(0.0));
/// let peak = derivative(0.5, 300.0, 0.5).unwrap();
/// assert!(peak < 0.0);
/// ```
pub fn derivative(energy: f64, temperature: f64, mu: f64) -> Option<f64> {
    if !is_well_formed(energy, temperature, mu) {
        return Some(f64::NAN);
    }
    let kt = thermal_energy(temperature);
    if kt == 0.0 {
        return if energy == mu { None } else { Some(0.0) };
    }

    let x = (energy - mu) / kt;
    if x.abs() > DERIVATIVE_CUTOFF {
        return Some(0.0);
    }
    let sech = 1.0 / (0.5 * x).cosh();
    let slope = -sech * sech / (4.0 * kt);
    slope.is_finite().then_some(slope)
}

/// Derivative values over an energy grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivativeCurve {
    pub temperature: f64,
    pub energies: Vec<f64>,
    /// `None` marks the undefined Dirac delta at μ for T = 0.
    pub derivative: Vec<Option<f64>>,
    /// Width of the derivative peak, `4·k_B·T`.
    pub peak_width: f64,
}

/// Evaluate [`derivative`] across `grid`.
///
/// When `k_B·T == 0` and μ lies within the grid, the grid point nearest μ
/// carries the delta (`None`) even if μ falls between two points.
pub fn derivative_curve(grid: &EnergyGrid, temperature: f64, mu: f64) -> DerivativeCurve {
    let mut values: Vec<Option<f64>> = grid
        .iter()
        .map(|energy| derivative(energy, temperature, mu))
        .collect();

    let frozen = is_well_formed(mu, temperature, mu) && thermal_energy(temperature) == 0.0;
    if frozen && (grid.min()..=grid.max()).contains(&mu) {
        if let Some(slot) = values.get_mut(nearest_index(grid.as_slice(), mu)) {
            *slot = None;
        }
    }

    DerivativeCurve {
        temperature,
        energies: grid.as_slice().to_vec(),
        derivative: values,
        peak_width: thermal_width(temperature),
    }
}

/// Index of the value closest to `target` in an ascending slice; ties go low.
fn nearest_index(values: &[f64], target: f64) -> usize {
    let upper = values.partition_point(|&value| value < target);
    if upper == 0 {
        return 0;
    }
    match values.get(upper) {
        Some(&above) if above - target < target - values[upper - 1] => upper,
        _ => upper - 1,
    }
}
