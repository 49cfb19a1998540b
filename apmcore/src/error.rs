//! Error types shared by the nuclide codec, the ion data model and the ranging layer.

use thiserror::Error;

/// Errors raised at the boundaries of the nuclide hash encoding and the isotope table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NuclideError {
    /// Proton or neutron count does not fit the hash bit layout
    #[error("nuclide (protons: {proton_count}, neutrons: {neutron_count}) exceeds the supported encoding range")]
    OutOfRange { proton_count: u16, neutron_count: u16 },

    /// Hash value outside the valid encoding space
    #[error("invalid nuclide hash value {0}")]
    InvalidHash(u32),

    /// Composition holds more atoms than a single ion may carry
    #[error("composition with {atoms} atoms exceeds the maximum of {max} atoms per ion")]
    CompositionTooLarge { atoms: usize, max: usize },

    /// Chemical symbol not found in the periodic table
    #[error("unknown element symbol {0:?}")]
    UnknownElement(String),

    /// Mass number not known for the element
    #[error("no isotope with mass number {mass_number} known for proton count {proton_count}")]
    UnknownIsotope { proton_count: u16, mass_number: u16 },
}

/// Errors raised when adding a mass-to-charge interval
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// Interval is inverted, non-finite, negative, too wide or insignificantly narrow
    #[error("invalid mass-to-charge range [{min}, {max}]: {reason}")]
    InvalidRange { min: f64, max: f64, reason: String },

    /// Interval partially overlaps an interval already claimed
    #[error("mass-to-charge range [{min}, {max}] overlaps existing range [{existing_min}, {existing_max}]")]
    Overlapping { min: f64, max: f64, existing_min: f64, existing_max: f64 },
}

/// Error raised when a range-file ion label does not follow the label grammar
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot parse ion label {label:?}: {reason}")]
pub struct LabelParseError {
    pub label: String,
    pub reason: String,
}

impl LabelParseError {
    pub fn new(label: &str, reason: impl Into<String>) -> Self {
        LabelParseError { label: label.to_string(), reason: reason.into() }
    }
}

/// Errors raised by the molecular ion builder
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    /// Composition hint holds no atoms
    #[error("composition hint holds no atoms")]
    EmptyComposition,

    /// Composition hint holds more atoms than a single ion may carry
    #[error("composition with {atoms} atoms exceeds the maximum of {max} atoms per ion")]
    CompositionTooLarge { atoms: usize, max: usize },

    /// Search produced more candidates than a single run may hold
    #[error("molecular ion search exceeds the maximum of {max} candidates, narrow the interval or the composition")]
    TooManyCandidates { max: usize },

    /// Invalid hash value inside the composition hint
    #[error(transparent)]
    Nuclide(#[from] NuclideError),

    /// Invalid target interval
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Builder configuration violates its bounds
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating a builder configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    /// Configuration file is not valid TOML for the expected layout
    #[error("failed to parse TOML configuration: {0}")]
    Toml(String),

    /// Parameter outside its admissible bounds
    #[error("invalid configuration parameter {parameter}: {reason}")]
    Invalid { parameter: &'static str, reason: String },
}

/// Errors raised by the range registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangingError {
    #[error(transparent)]
    Label(#[from] LabelParseError),

    #[error(transparent)]
    Nuclide(#[from] NuclideError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    /// Registry already holds the maximum number of distinct ions
    #[error("registry already holds the maximum of {0} ion species")]
    TooManyIonSpecies(usize),

    /// No ion registered under the key
    #[error("no ion registered under key {0:?}")]
    UnknownIon(String),

    /// Worker pool for parallel resolution could not be started
    #[error("failed to build resolution thread pool: {0}")]
    ThreadPool(String),
}

/// A ranging failure attributed to one entry of a range file
#[derive(Debug, Clone, PartialEq, Error)]
#[error("range entry {index} ({label:?}): {source}")]
pub struct RangeEntryError {
    pub index: usize,
    pub label: String,
    #[source]
    pub source: RangingError,
}
