pub mod resolve;
pub mod settings;
pub mod template;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::resolve::{CliOverrides, ResolvedRunConfig};
pub use self::settings::CompareSettings;
pub use self::template::{config_file_exists, write_gitignore, write_template};

pub(crate) const CONFIG_DIR: &str = ".visdiff";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub compare: CompareSettings,
}

impl Config {
    /// Validate semantic constraints that serde cannot express.
    fn validate(&self) -> Result<()> {
        self.compare
            .to_comparison_config(false)
            .map_err(|e| anyhow::anyhow!("compare: {e}"))?;
        Ok(())
    }
}

/// Read `<root>/config.toml`. A missing file yields the defaults.
pub fn load(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid {}", path.display()))?;
    Ok(config)
}
