//! Fermi-Dirac occupation engine.
//!
//! This crate evaluates `f(E, T) = 1 / (exp((E - μ)/(k_B·T)) + 1)` at single
//! points, across energy grids, for sets of temperatures, and over an
//! energy–temperature surface. Evaluation is pure and stateless; all
//! validation happens when grids and temperature sets are constructed.
//! Higher-level consumers (HTTP service, CLI) should only depend on the
//! functions exported here instead of reimplementing the physics.
//!
//! ```
//! use fermidirac_lib::{multi_curve, EnergyGrid, TemperatureSet};
//!
//! let grid = EnergyGrid::linear(-1.0, 2.0, 500).unwrap();
//! let temperatures = TemperatureSet::new(vec![0.0, 100.0, 300.0, 1000.0, 3000.0]).unwrap();
//! let result = multi_curve(&grid, &temperatures, 0.5, false);
//! assert_eq!(result.curves.len(), 5);
//! ```

#![deny(warnings)]

pub mod constants;
pub mod curve;
pub mod derived;
pub mod error;
pub mod export;
pub mod grid;
pub mod info;
pub mod multi;
pub mod occupation;
pub mod regime;
pub mod surface;

pub use constants::K_BOLTZMANN_EV;
pub use curve::{curve, OccupationCurve, TemperatureCurve};
pub use derived::{derivative, derivative_curve, thermal_width, DerivativeCurve};
pub use error::{Error, Result};
pub use export::{csv_filename, curve_to_csv, write_curve_csv};
pub use grid::{
    validate_chemical_potential, validate_temperature, EnergyGrid, Spacing, TemperatureAxis,
    TemperatureSet,
};
pub use info::{physics_info, PhysicsInfo, RegimeInfo};
pub use multi::{multi_curve, MultiCurve};
pub use occupation::{maxwell_boltzmann, occupation};
pub use regime::{classify, fermi_temperature, free_electron_fermi_energy, Regime};
pub use surface::{surface, surface_on_axis, Surface};
