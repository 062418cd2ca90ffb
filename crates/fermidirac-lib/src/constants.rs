//! Physical constants and numerical thresholds shared by the evaluators.

/// Boltzmann constant in eV/K (CODATA 2018, exact by SI definition).
pub const K_BOLTZMANN_EV: f64 = 8.617333262e-5;

/// Boltzmann constant in J/K.
pub const K_BOLTZMANN_SI: f64 = 1.380649e-23;

/// Largest reduced energy |x| = |E - μ| / (k_B·T) evaluated with the direct
/// formula. `exp(709.78)` is the last finite double, so anything beyond this
/// threshold takes an asymptotic branch instead of calling `exp(x)`.
pub const OVERFLOW_THRESHOLD: f64 = 700.0;

/// Beyond this |x| the derivative `sech²(x/2)` underflows and is reported as zero.
pub const DERIVATIVE_CUTOFF: f64 = 2.0 * OVERFLOW_THRESHOLD;

/// Multiple of k_B·T used for the thermal smearing width annotation.
pub const THERMAL_WIDTH_FACTOR: f64 = 4.0;

/// Lowest temperature (K) used as the start of a logarithmic temperature axis.
pub const LOG_TEMPERATURE_FLOOR: f64 = 0.1;

/// T/T_F at or below which a system is classified as degenerate.
pub const DEGENERATE_RATIO: f64 = 0.1;

/// T/T_F at or above which a system is classified as classical.
pub const CLASSICAL_RATIO: f64 = 10.0;

/// Minimum number of points in any generated grid.
pub const MIN_GRID_POINTS: usize = 2;
