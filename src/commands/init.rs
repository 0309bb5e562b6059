use crate::config::{AnalysisConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const HEADER: &str = "# qualmap configuration
#
# Weights must sum to 1.0. Thresholds control when metrics raise issues.
# Exclude patterns are split on `*`; a path is excluded when it contains
# every remaining segment in order.

";

pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&AnalysisConfig::default())
        .context("Failed to serialize default configuration")?;
    Ok(format!("{HEADER}{body}"))
}

/// Write a default `.qualmap.toml` into `dir`.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, &default_config_toml()?)?;
    println!("Created {}", config_path.display());

    Ok(config_path)
}
