//! Error kinds surfaced by the noise pipeline.
//!
//! Configuration and dimension problems are detected before any noise is
//! generated. Non-finite noise samples are not errors: they flow through the
//! compositor as data and end up clamped.

/// Any failure that aborts processing of a single image.
#[derive(Debug, thiserror::Error)]
pub enum GrainError {
    #[error("invalid noise configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid image dimensions: {0}")]
    Dimension(#[from] DimensionError),
}

/// A `NoiseConfig` field outside its accepted range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
    #[error("seed {0} is not a non-negative 32-bit integer")]
    InvalidSeed(i64),
}

/// Image shape problems. Fatal for the image they belong to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("image has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    #[error("unsupported channel count {0}, only 3-channel RGB is accepted")]
    UnsupportedChannels(u32),
    #[error("noise field holds {actual} values, expected {expected}")]
    FieldLength { expected: usize, actual: usize },
}

/// Problems while loading a preset library.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("failed to parse presets: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("preset '{name}' has invalid settings: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ConfigError,
    },
    #[error("preset stored under '{key}' is named '{name}'")]
    NameMismatch { key: String, name: String },
}

pub type Result<T, E = GrainError> = std::result::Result<T, E>;
