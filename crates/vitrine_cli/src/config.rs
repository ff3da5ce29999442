//! Vitrine configuration file handling

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vitrine_design::config::CONFIG_FILE_NAME;
use vitrine_design::DesignConfig;

/// Load configuration from an explicit path, or from `vitrine.toml` in the
/// current directory when present. Falls back to defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<DesignConfig> {
    if let Some(path) = explicit {
        return DesignConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()));
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        tracing::debug!("using {}", local.display());
        return DesignConfig::load(local)
            .with_context(|| format!("Failed to load {}", local.display()));
    }

    tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
    Ok(DesignConfig::default())
}

/// Write a default `vitrine.toml` into `dir`
pub fn init(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let content = DesignConfig::default()
        .to_toml()
        .context("Failed to serialize config")?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
