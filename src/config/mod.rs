//! Planner configuration: `planner.toml` inside the planner home directory.

pub mod schema;

pub use schema::{PlannerConfig, RuntimeKind};

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file name inside the home directory.
pub const CONFIG_FILE: &str = "planner.toml";

/// Default home directory (~/.event-planner).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".event-planner"))
        .unwrap_or_else(|| PathBuf::from(".event-planner"))
}

/// Resolve a `--home` argument (tilde allowed), falling back to the default.
pub fn resolve_home_dir(home: Option<&str>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(shellexpand::tilde(home).into_owned()),
        None => default_home_dir(),
    }
}

/// Location of the config file for a home directory.
pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

/// Read `planner.toml`. A missing file means every field takes its default.
pub fn load_config(path: &Path) -> Result<PlannerConfig> {
    if !path.exists() {
        return Ok(PlannerConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read planner config {}", path.display()))?;
    toml::from_str(&contents).context("Failed to parse planner config (TOML)")
}

pub fn save_config(config: &PlannerConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize planner config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write planner config {}", path.display()))
}

/// Write a default `planner.toml` under `home` and return its path.
///
/// An existing file is left untouched unless `force` is set.
pub fn init_config(home: &Path, force: bool) -> Result<PathBuf> {
    let path = config_path(home);
    if path.exists() && !force {
        bail!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        );
    }
    save_config(&PlannerConfig::default(), &path)?;
    info!("Wrote default planner config to {}", path.display());
    Ok(path)
}
