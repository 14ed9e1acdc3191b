//! Error types for the comparison engine.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected comparison settings. Raised when a configuration is parsed or an
/// engine is constructed, never while comparing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("marking block must be at least 1x1, got {width}x{height}")]
    MarkingBlock { width: u32, height: u32 },

    #[error("pixel_per_block must be at least 1, got {0}")]
    PixelPerBlock(u32),

    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    Tolerance { name: &'static str, value: f64 },

    #[error("unknown comparison algorithm '{0}' (expected exact, color-fuzzy or block-fuzzy)")]
    UnknownAlgorithm(String),

    #[error("unknown transparency mode '{0}' (expected force-difference or compare-channels)")]
    UnknownTransparency(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to read or decode an image.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
