use serde::{Deserialize, Serialize};
use visdiff::{Algorithm, ComparisonConfig, ConfigError, TransparencyMode};

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    visdiff::compare::settings::validate_tolerance("tolerance", v).map_err(|e| e.to_string())
}

/// Comparison settings as they appear in `[compare]` and on the command line.
///
/// Every field is `Option`: `None` means "inherit from the layer below".
#[derive(Clone, Debug, Default, PartialEq, clap::Args, Serialize, Deserialize)]
pub struct CompareSettings {
    /// Detection algorithm
    #[arg(long, value_enum)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    /// Per-pixel color distance still treated as equal (0.0-1.0)
    #[arg(long, value_parser = parse_tolerance)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_tolerance: Option<f64>,

    /// Share of a detection block allowed to differ (0.0-1.0, block-fuzzy only)
    #[arg(long, value_parser = parse_tolerance)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_tolerance: Option<f64>,

    /// Detection block side length (block-fuzzy only)
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_per_block: Option<u32>,

    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marking_block_width: Option<u32>,

    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marking_block_height: Option<u32>,

    /// Close small gaps in the mask after each comparison
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_mask: Option<bool>,

    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structuring_element_width: Option<u32>,

    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structuring_element_height: Option<u32>,

    /// Also write a grayscale difference image for failures
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference_image: Option<bool>,

    /// How fully transparent pixels are compared
    #[arg(long, value_enum)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<TransparencyMode>,
}

impl CompareSettings {
    /// Overlay non-None fields from `other` onto self.
    pub fn merge(&mut self, other: &CompareSettings) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        overlay!(
            algorithm,
            color_tolerance,
            pixel_tolerance,
            pixel_per_block,
            marking_block_width,
            marking_block_height,
            close_mask,
            structuring_element_width,
            structuring_element_height,
            difference_image,
            transparency,
        );
    }

    /// Fill unset fields from the engine defaults and validate the result.
    pub fn to_comparison_config(
        &self,
        training_mode: bool,
    ) -> Result<ComparisonConfig, ConfigError> {
        let d = ComparisonConfig::default();
        let config = ComparisonConfig {
            algorithm: self.algorithm.unwrap_or(d.algorithm),
            color_tolerance: self.color_tolerance.unwrap_or(d.color_tolerance),
            pixel_tolerance: self.pixel_tolerance.unwrap_or(d.pixel_tolerance),
            pixel_per_block: self.pixel_per_block.unwrap_or(d.pixel_per_block),
            marking_block_width: self.marking_block_width.unwrap_or(d.marking_block_width),
            marking_block_height: self.marking_block_height.unwrap_or(d.marking_block_height),
            training_mode,
            close_mask: self.close_mask.unwrap_or(d.close_mask),
            structuring_element_width: self
                .structuring_element_width
                .unwrap_or(d.structuring_element_width),
            structuring_element_height: self
                .structuring_element_height
                .unwrap_or(d.structuring_element_height),
            difference_image: self.difference_image.unwrap_or(d.difference_image),
            transparency: self.transparency.unwrap_or(d.transparency),
        };
        config.validate()?;
        Ok(config)
    }
}
