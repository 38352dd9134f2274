//! Error types for terrain generation.

use thiserror::Error;

/// Grid access outside `[0, width] x [0, height]`.
///
/// The field never clamps; callers check bounds before they index.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("height field index ({x}, {y}) out of range [0, {width}] x [0, {height}]")]
pub struct FieldError {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// A configuration value that generation cannot run with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field}: range minimum {min} is greater than maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field}: must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field}: must be negative (got {value})")]
    NotNegative { field: &'static str, value: f64 },

    #[error("{field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error(
        "river.max_carve_iterations: carving at ({x}, {y}) did not reach depth {depth} \
         after {iterations} deposits"
    )]
    RiverDidNotConverge {
        x: usize,
        y: usize,
        depth: f32,
        iterations: usize,
    },
}

impl ConfigError {
    /// Name of the configuration field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvertedRange { field, .. }
            | Self::NotPositive { field, .. }
            | Self::NotNegative { field, .. }
            | Self::Invalid { field, .. } => field,
            Self::RiverDidNotConverge { .. } => "river.max_carve_iterations",
        }
    }
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    OutOfRange(#[from] FieldError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
