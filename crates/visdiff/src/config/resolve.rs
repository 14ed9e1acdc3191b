use std::path::Path;

use anyhow::{Context, Result};
use visdiff::{Algorithm, ComparisonConfig};

use super::load;
use super::settings::CompareSettings;

/// Values extracted from the CLI that participate in the merge.
pub struct CliOverrides {
    pub settings: CompareSettings,
    pub train: bool,
}

/// Values read from `VISDIFF_*` environment variables.
#[derive(Debug, Default)]
pub struct EnvOverrides {
    pub algorithm: Option<Algorithm>,
    pub color_tolerance: Option<f64>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        let algorithm = std::env::var("VISDIFF_ALGORITHM")
            .ok()
            .map(|v| v.parse::<Algorithm>())
            .transpose()
            .context("VISDIFF_ALGORITHM is not a known algorithm")?;
        let color_tolerance = std::env::var("VISDIFF_COLOR_TOLERANCE")
            .ok()
            .map(|v| v.parse::<f64>())
            .transpose()
            .context("VISDIFF_COLOR_TOLERANCE must be a valid float")?;
        Ok(Self {
            algorithm,
            color_tolerance,
        })
    }

    fn as_settings(&self) -> CompareSettings {
        CompareSettings {
            algorithm: self.algorithm,
            color_tolerance: self.color_tolerance,
            ..Default::default()
        }
    }
}

/// Fully resolved config after CLI > env > file > defaults merge.
#[derive(Debug)]
pub struct ResolvedRunConfig {
    pub comparison: ComparisonConfig,
}

impl ResolvedRunConfig {
    pub fn new(root: &Path, cli: CliOverrides) -> Result<Self> {
        let file = load(root)?;
        let env = EnvOverrides::from_env()?;
        Self::merge(file.compare, &env, cli)
    }

    fn merge(file: CompareSettings, env: &EnvOverrides, cli: CliOverrides) -> Result<Self> {
        // File base, then env, then CLI on top.
        let mut settings = file;
        settings.merge(&env.as_settings());
        settings.merge(&cli.settings);

        let comparison = settings
            .to_comparison_config(cli.train)
            .context("Invalid comparison settings")?;
        Ok(Self { comparison })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visdiff::TransparencyMode;

    fn cli(settings: CompareSettings) -> CliOverrides {
        CliOverrides {
            settings,
            train: false,
        }
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = CompareSettings {
            algorithm: Some(Algorithm::Exact),
            color_tolerance: Some(0.3),
            transparency: Some(TransparencyMode::CompareChannels),
            ..Default::default()
        };
        let env = EnvOverrides {
            algorithm: Some(Algorithm::ColorFuzzy),
            color_tolerance: Some(0.2),
        };
        let resolved = ResolvedRunConfig::merge(
            file,
            &env,
            cli(CompareSettings {
                color_tolerance: Some(0.05),
                ..Default::default()
            }),
        )
        .unwrap();
        let c = resolved.comparison;
        assert_eq!(c.algorithm, Algorithm::ColorFuzzy);
        assert_eq!(c.color_tolerance, 0.05);
        assert_eq!(c.transparency, TransparencyMode::CompareChannels);
        assert_eq!(c.pixel_per_block, ComparisonConfig::default().pixel_per_block);
    }

    #[test]
    fn train_flag_enables_training_mode() {
        let resolved = ResolvedRunConfig::merge(
            CompareSettings::default(),
            &EnvOverrides::default(),
            CliOverrides {
                settings: CompareSettings::default(),
                train: true,
            },
        )
        .unwrap();
        assert!(resolved.comparison.training_mode);
    }

    #[test]
    fn out_of_range_env_tolerance_is_rejected() {
        let env = EnvOverrides {
            algorithm: None,
            color_tolerance: Some(4.0),
        };
        let err = ResolvedRunConfig::merge(
            CompareSettings::default(),
            &env,
            cli(CompareSettings::default()),
        );
        assert!(err.is_err());
    }
}
