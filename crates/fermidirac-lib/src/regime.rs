//! Thermal regime classification relative to the Fermi temperature.
//!
//! The ratio `T / T_F` decides the regime:
//!
//! ```text
//! T / T_F <= 0.1        degenerate
//! 0.1 < T / T_F < 10    intermediate
//! T / T_F >= 10         classical
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CLASSICAL_RATIO, DEGENERATE_RATIO, K_BOLTZMANN_EV};
use crate::error::{Error, Result};
use crate::grid::validate_temperature;

/// Thermal regime of a fermion gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// T ≪ T_F: sharp Fermi surface, step-like occupation.
    Degenerate,
    /// T ~ T_F: full quantum statistics required.
    Intermediate,
    /// T ≫ T_F: occupation approaches Maxwell-Boltzmann.
    Classical,
}

impl Regime {
    pub const ALL: [Regime; 3] = [Regime::Degenerate, Regime::Intermediate, Regime::Classical];

    pub fn as_str(self) -> &'static str {
        match self {
            Regime::Degenerate => "degenerate",
            Regime::Intermediate => "intermediate",
            Regime::Classical => "classical",
        }
    }

    /// Qualitative condition on T relative to T_F.
    pub fn condition(self) -> &'static str {
        match self {
            Regime::Degenerate => "T << T_F (Fermi temperature)",
            Regime::Intermediate => "T ~ T_F",
            Regime::Classical => "T >> T_F",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Regime::Degenerate => "Quantum regime with sharp Fermi surface",
            Regime::Intermediate => "Full quantum statistics required",
            Regime::Classical => "Approaches Maxwell-Boltzmann distribution",
        }
    }

    /// Physical systems typically found in this regime.
    pub fn applications(self) -> &'static [&'static str] {
        match self {
            Regime::Degenerate => &["metals at room temperature", "white dwarfs"],
            Regime::Intermediate => &["semiconductor devices", "neutron stars"],
            Regime::Classical => &["semiconductors with low doping", "hot plasmas"],
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `temperature` against the Fermi temperature `fermi_temperature` (both K).
///
/// # Errors
///
/// Returns an error if `temperature` is negative or not finite, or if
/// `fermi_temperature` is not finite and positive.
///
/// # Examples
///
/// ```
/// use fermidirac_lib::{classify, Regime};
///
/// // Copper: T_F ≈ 81,000 K, so room temperature is deeply degenerate.
/// assert_eq!(classify(300.0, 81_000.0).unwrap(), Regime::Degenerate);
/// assert_eq!(classify(1000.0, 1000.0).unwrap(), Regime::Intermediate);
/// assert_eq!(classify(1e5, 1000.0).unwrap(), Regime::Classical);
/// ```
pub fn classify(temperature: f64, fermi_temperature: f64) -> Result<Regime> {
    validate_temperature(temperature)?;
    if !fermi_temperature.is_finite() || fermi_temperature <= 0.0 {
        return Err(Error::InvalidFermiTemperature { fermi_temperature });
    }

    let ratio = temperature / fermi_temperature;
    Ok(if ratio <= DEGENERATE_RATIO {
        Regime::Degenerate
    } else if ratio >= CLASSICAL_RATIO {
        Regime::Classical
    } else {
        Regime::Intermediate
    })
}

/// Fermi temperature `T_F = E_F / k_B` (K) for a Fermi energy in eV.
pub fn fermi_temperature(fermi_energy: f64) -> f64 {
    fermi_energy / K_BOLTZMANN_EV
}

/// Free-electron Fermi energy scaling with density.
///
/// Returns `prefactor · n^(2/3)` in three dimensions and `prefactor · n` in
/// two, where `prefactor` carries the `ħ²/2m` and geometric factors in the
/// caller's units.
///
/// # Errors
///
/// Returns an error for any dimension other than 2 or 3.
pub fn free_electron_fermi_energy(density: f64, prefactor: f64, dimension: u32) -> Result<f64> {
    match dimension {
        3 => Ok(prefactor * density.powf(2.0 / 3.0)),
        2 => Ok(prefactor * density),
        _ => Err(Error::UnsupportedDimension { dimension }),
    }
}
