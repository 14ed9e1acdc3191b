use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How differing pixels are detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Any change in value is a difference.
    Exact,
    /// Per-pixel perceptual distance above `color_tolerance`.
    ColorFuzzy,
    /// Like `ColorFuzzy`, but a block only reports its differences once more
    /// than `pixel_tolerance` of it has changed.
    #[default]
    BlockFuzzy,
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "match" => Ok(Self::Exact),
            "color-fuzzy" | "colorfuzzy" => Ok(Self::ColorFuzzy),
            "block-fuzzy" | "fuzzy" => Ok(Self::BlockFuzzy),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::ColorFuzzy => "color-fuzzy",
            Self::BlockFuzzy => "block-fuzzy",
        })
    }
}

/// What a fully transparent pixel (alpha 0) means to the algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransparencyMode {
    /// Transparency on either side is a maximal difference.
    #[default]
    ForceDifference,
    /// Alpha is just another channel: `Exact` compares it, the fuzzy
    /// algorithms ignore it.
    CompareChannels,
}

impl FromStr for TransparencyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "force-difference" => Ok(Self::ForceDifference),
            "compare-channels" => Ok(Self::CompareChannels),
            _ => Err(ConfigError::UnknownTransparency(s.to_string())),
        }
    }
}

/// Settings for one comparison engine. Checked once by
/// [`ImageComparison::new`](super::diff::ImageComparison::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub algorithm: Algorithm,
    /// Per-pixel perceptual distance (0.0-1.0) still treated as equal.
    pub color_tolerance: f64,
    /// Share of a detection block (0.0-1.0) allowed to differ. `BlockFuzzy` only.
    pub pixel_tolerance: f64,
    /// Side length of the square detection blocks. `BlockFuzzy` only.
    pub pixel_per_block: u32,
    /// Annotation and training block size.
    pub marking_block_width: u32,
    pub marking_block_height: u32,
    /// Learn differences into the mask instead of reporting them.
    pub training_mode: bool,
    /// Close small gaps in the mask after every comparison.
    pub close_mask: bool,
    pub structuring_element_width: u32,
    pub structuring_element_height: u32,
    /// Also render a grayscale difference image.
    pub difference_image: bool,
    pub transparency: TransparencyMode,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::BlockFuzzy,
            color_tolerance: 0.1,
            pixel_tolerance: 0.2,
            pixel_per_block: 20,
            marking_block_width: 10,
            marking_block_height: 10,
            training_mode: false,
            close_mask: false,
            structuring_element_width: 10,
            structuring_element_height: 10,
            difference_image: false,
            transparency: TransparencyMode::ForceDifference,
        }
    }
}

impl ComparisonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marking_block_width == 0 || self.marking_block_height == 0 {
            return Err(ConfigError::MarkingBlock {
                width: self.marking_block_width,
                height: self.marking_block_height,
            });
        }
        if self.pixel_per_block == 0 {
            return Err(ConfigError::PixelPerBlock(self.pixel_per_block));
        }
        validate_tolerance("color_tolerance", self.color_tolerance)?;
        validate_tolerance("pixel_tolerance", self.pixel_tolerance)?;
        Ok(())
    }
}

/// Accepts values in `[0.0, 1.0]`; NaN is rejected.
pub fn validate_tolerance(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Tolerance { name, value });
    }
    Ok(value)
}
