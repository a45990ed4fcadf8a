// --- File: error.rs ---
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating simulation configuration.
///
/// Runtime deaths and food expiry are state transitions, not errors; this is
/// the only failure taxonomy the simulation has.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("species `{species}`: {field} must be finite and positive, got {value}")]
    NonPositive {
        species: String,
        field: &'static str,
        value: f64,
    },
    #[error("species `{species}`: {field} must be finite and non-negative, got {value}")]
    Negative {
        species: String,
        field: &'static str,
        value: f64,
    },
    #[error("species `{species}`: max size {max_width}x{max_height} is smaller than min size {min_width}x{min_height}")]
    InvertedSize {
        species: String,
        min_width: f32,
        min_height: f32,
        max_width: f32,
        max_height: f32,
    },
    #[error("species name must not be empty")]
    UnnamedSpecies,
    #[error("species `{0}` is defined more than once")]
    DuplicateSpecies(String),
    #[error("population entry refers to unknown species `{0}`")]
    UnknownSpecies(String),
    #[error("tank {width}x{height} with sand height {sand_height} leaves no swimmable water")]
    InvalidTank {
        width: f32,
        height: f32,
        sand_height: f32,
    },
    #[error("initial {field} must be finite, got {value}")]
    InvalidInitialState { field: &'static str, value: f64 },
    #[error("water quality {0} must lie in [0, 1]")]
    InvalidWaterQuality(f32),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
// --- End of File: error.rs ---
