//! Static physics reference data served alongside computed curves.

use serde::Serialize;

use crate::constants::{K_BOLTZMANN_EV, K_BOLTZMANN_SI};
use crate::regime::Regime;

/// LaTeX form of the occupation function.
pub const FERMI_DIRAC_EQUATION: &str = r"f(E, T) = \frac{1}{e^{(E - \mu)/(k_B T)} + 1}";

/// Description of a single thermal regime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeInfo {
    pub regime: Regime,
    pub condition: &'static str,
    pub description: &'static str,
    pub applications: &'static [&'static str],
}

impl From<Regime> for RegimeInfo {
    fn from(regime: Regime) -> Self {
        Self {
            regime,
            condition: regime.condition(),
            description: regime.description(),
            applications: regime.applications(),
        }
    }
}

/// Physical constants, the governing equation, and regime descriptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicsInfo {
    #[serde(rename = "k_B_eV")]
    pub k_b_ev: f64,
    #[serde(rename = "k_B_SI")]
    pub k_b_si: f64,
    pub equation: &'static str,
    pub regimes: Vec<RegimeInfo>,
}

pub fn physics_info() -> PhysicsInfo {
    PhysicsInfo {
        k_b_ev: K_BOLTZMANN_EV,
        k_b_si: K_BOLTZMANN_SI,
        equation: FERMI_DIRAC_EQUATION,
        regimes: Regime::ALL.into_iter().map(RegimeInfo::from).collect(),
    }
}
