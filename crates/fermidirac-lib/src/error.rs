use thiserror::Error;

/// Convenient result alias for the Fermi-Dirac library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant except the I/O wrappers is a validation failure raised before
/// any evaluator runs; the evaluators themselves are infallible.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an energy range is empty, inverted, or not finite.
    #[error("invalid energy range: minimum {min} must be finite and less than maximum {max}")]
    InvalidRange { min: f64, max: f64 },

    /// Raised when a logarithmic grid is requested over a non-positive range.
    #[error("logarithmic spacing requires a positive minimum, got {min}")]
    NonPositiveLogRange { min: f64 },

    /// Raised when a grid would contain fewer than the minimum number of points.
    #[error("grid requires at least {minimum} points, got {points}")]
    InvalidPointCount { points: usize, minimum: usize },

    /// Raised when an explicit energy list is not strictly increasing and finite.
    #[error("energy values must be finite and strictly increasing (violated at index {index})")]
    UnorderedEnergies { index: usize },

    /// Raised when a temperature is negative or not finite.
    #[error("temperature must be a finite non-negative value in kelvin, got {temperature}")]
    InvalidTemperature { temperature: f64 },

    /// Raised when surface temperature bounds cannot form a strictly increasing axis.
    #[error("invalid temperature range: {min} K to {max} K does not form an increasing axis")]
    InvalidTemperatureRange { min: f64, max: f64 },

    /// Raised when a temperature set contains no temperatures.
    #[error("at least one temperature is required")]
    EmptyTemperatureSet,

    /// Raised when the chemical potential is not finite.
    #[error("chemical potential must be finite, got {mu}")]
    InvalidChemicalPotential { mu: f64 },

    /// Raised when a Fermi energy or temperature cannot serve as a reference scale.
    #[error("Fermi temperature must be finite and positive, got {fermi_temperature}")]
    InvalidFermiTemperature { fermi_temperature: f64 },

    /// Raised when a grid spacing name is not recognised.
    #[error("unknown spacing '{value}'; expected 'linear' or 'log'")]
    UnknownSpacing { value: String },

    /// Raised when a free-electron Fermi energy is requested for an unsupported dimension.
    #[error("unsupported dimension: {dimension}")]
    UnsupportedDimension { dimension: u32 },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV serialization errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for errors caused by caller-supplied parameters.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Csv(_))
    }
}
