//! # Configuration
//!
//! Centralizes runtime settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.prepa/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! This is separate from the catalog (`matieres.json`), which describes the
//! exams themselves and is loaded by [`crate::core::catalog`].

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::router::DEFAULT_LATEST_YEAR;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PrepaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub title: Option<String>,
    pub latest_year: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PathsConfig {
    pub catalog: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub catalog: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
    pub latest_year: Option<i32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "Préparation au Brevet et Bac";
pub const DEFAULT_CATALOG: &str = "matieres.json";
pub const DEFAULT_CONTENT_DIR: &str = "content";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub title: String,
    pub latest_year: i32,
    pub catalog: PathBuf,
    pub content_dir: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.prepa/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".prepa").join("config.toml"))
}

/// Load config from `~/.prepa/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PrepaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PrepaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PrepaConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PrepaConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PrepaConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: PrepaConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Prepa Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# title = "Préparation au Brevet et Bac"
# latest_year = 2023                 # Most recent year offered for every subject

# [paths]
# catalog = "matieres.json"          # Or set PREPA_CATALOG env var
# content_dir = "content"            # Or set PREPA_CONTENT_DIR env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PrepaConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &PrepaConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Catalog: CLI → env → config → default
    let catalog = cli
        .catalog
        .clone()
        .or_else(|| env("PREPA_CATALOG").map(PathBuf::from))
        .or_else(|| config.paths.catalog.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG));

    // Content dir: CLI → env → config → default
    let content_dir = cli
        .content_dir
        .clone()
        .or_else(|| env("PREPA_CONTENT_DIR").map(PathBuf::from))
        .or_else(|| config.paths.content_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));

    // Latest year: CLI → env → config → default
    let latest_year = cli
        .latest_year
        .or_else(|| {
            env("PREPA_LATEST_YEAR").and_then(|v| match v.trim().parse() {
                Ok(year) => Some(year),
                Err(e) => {
                    warn!("Ignoring PREPA_LATEST_YEAR={:?}: {}", v, e);
                    None
                }
            })
        })
        .or(config.general.latest_year)
        .unwrap_or(DEFAULT_LATEST_YEAR);

    ResolvedConfig {
        title: config
            .general
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        latest_year,
        catalog,
        content_dir,
    }
}
