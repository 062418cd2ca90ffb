//! Point evaluation of the Fermi-Dirac and Maxwell-Boltzmann occupations.
//!
//! The occupation probability of a fermionic state is
//!
//! ```text
//! f(E, T) = 1 / (exp((E - μ) / (k_B·T)) + 1)
//! ```
//!
//! Evaluation is split on the reduced energy `x = (E - μ) / (k_B·T)`:
//!
//! * `k_B·T == 0` (T = 0, or a subnormal T that underflows): exact
//!   Heaviside step, with `f(μ) = 0.5`
//! * `x > 700`: `f ≈ exp(-x)`, which underflows smoothly to 0.0
//! * `x < -700`: `f = 1.0`
//! * otherwise the direct formula
//!
//! so `exp(x)` is never evaluated where it would overflow.

use crate::constants::{K_BOLTZMANN_EV, OVERFLOW_THRESHOLD};

/// Occupation probability of a state at `energy` (eV) for `temperature` (K)
/// and chemical potential `mu` (eV).
///
/// Returns a value in `[0, 1]` for finite inputs with `temperature >= 0`.
/// Non-finite inputs and negative temperatures yield `NaN`; rejecting them is
/// the caller's job (see [`validate_temperature`](crate::validate_temperature)).
///
/// # Examples
///
/// ```
/// use fermidirac_lib::occupation;
///
/// assert_eq!(occupation(0.5, 300.0, 0.5), 0.5);
/// assert_eq!(occupation(0.2, 0.0, 0.5), 1.0);
/// assert_eq!(occupation(0.5, 0.0, 0.5), 0.5);
/// assert_eq!(occupation(0.8, 0.0, 0.5), 0.0);
/// ```
pub fn occupation(energy: f64, temperature: f64, mu: f64) -> f64 {
    if !is_well_formed(energy, temperature, mu) {
        return f64::NAN;
    }
    let kt = thermal_energy(temperature);
    if kt == 0.0 {
        return step(energy, mu);
    }

    let x = (energy - mu) / kt;
    if x > OVERFLOW_THRESHOLD {
        (-x).exp()
    } else if x < -OVERFLOW_THRESHOLD {
        1.0
    } else {
        1.0 / (x.exp() + 1.0)
    }
}

/// Classical Maxwell-Boltzmann occupation `exp(-(E - μ) / (k_B·T))`.
///
/// The exponent is clamped to `[-700, 700]`, so energies far below μ give a
/// large but finite value. Returns `None` when `k_B·T == 0`, where the
/// classical distribution is undefined.
///
/// # Examples
///
/// ```
/// use fermidirac_lib::maxwell_boltzmann;
///
/// assert_eq!(maxwell_boltzmann(0.5, 300.0, 0.5), Some(1.0));
/// assert_eq!(maxwell_boltzmann(0.5, 0.0, 0.5), None);
/// assert!(maxwell_boltzmann(-100.0, 1.0, 0.5).unwrap().is_finite());
/// ```
pub fn maxwell_boltzmann(energy: f64, temperature: f64, mu: f64) -> Option<f64> {
    if !is_well_formed(energy, temperature, mu) {
        return Some(f64::NAN);
    }
    let kt = thermal_energy(temperature);
    if kt == 0.0 {
        return None;
    }
    let x = ((energy - mu) / kt).clamp(-OVERFLOW_THRESHOLD, OVERFLOW_THRESHOLD);
    Some((-x).exp())
}

/// Reduced energy `(E - μ) / (k_B·T)`.
pub fn reduced_energy(energy: f64, temperature: f64, mu: f64) -> f64 {
    (energy - mu) / thermal_energy(temperature)
}

/// `k_B·T` in eV. Zero for T = 0 and for subnormal temperatures.
pub(crate) fn thermal_energy(temperature: f64) -> f64 {
    K_BOLTZMANN_EV * temperature
}

/// True when `x` lies outside the directly evaluated region.
pub fn is_guarded(x: f64) -> bool {
    x.abs() > OVERFLOW_THRESHOLD
}

/// Exact zero-temperature occupation.
pub(crate) fn step(energy: f64, mu: f64) -> f64 {
    if energy < mu {
        1.0
    } else if energy > mu {
        0.0
    } else {
        0.5
    }
}

pub(crate) fn is_well_formed(energy: f64, temperature: f64, mu: f64) -> bool {
    energy.is_finite() && mu.is_finite() && temperature.is_finite() && temperature >= 0.0
}
