//! Configuration file support for build-info-collector.
//!
//! Provides YAML-based configuration through `build-info.config.yml` files,
//! including data structures, file loading, validation, and merging with
//! command-line overrides.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::DEFAULT_CHECKSUM_WORKERS;
use crate::build_info::services::{
    DEFAULT_ENV_EXCLUDE, DEFAULT_MAX_PATHS_PER_DEPENDENCY, DEFAULT_MAX_PATH_LENGTH,
};
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "build-info.config.yml";

/// Upper bound for the configurable checksum worker count
const MAX_CHECKSUM_WORKERS: usize = 64;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Root directory for per-build fragment directories
    pub temp_dir: Option<PathBuf>,
    pub max_path_length: Option<usize>,
    pub max_paths_per_dependency: Option<usize>,
    pub env_include: Option<Vec<String>>,
    pub env_exclude: Option<Vec<String>>,
    pub checksum_workers: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective settings after applying defaults, the config file and CLI flags
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub temp_dir: PathBuf,
    pub max_path_length: usize,
    pub max_paths_per_dependency: usize,
    pub env_include: Vec<String>,
    pub env_exclude: Vec<String>,
    pub checksum_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir().join("build-info"),
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            max_paths_per_dependency: DEFAULT_MAX_PATHS_PER_DEPENDENCY,
            env_include: Vec::new(),
            env_exclude: DEFAULT_ENV_EXCLUDE.iter().map(|p| p.to_string()).collect(),
            checksum_workers: DEFAULT_CHECKSUM_WORKERS,
        }
    }
}

impl Settings {
    /// Layers the values present in `config` over the defaults
    pub fn from_config(config: Option<ConfigFile>) -> Self {
        let defaults = Self::default();
        let Some(config) = config else {
            return defaults;
        };

        Self {
            temp_dir: config.temp_dir.unwrap_or(defaults.temp_dir),
            max_path_length: config.max_path_length.unwrap_or(defaults.max_path_length),
            max_paths_per_dependency: config
                .max_paths_per_dependency
                .unwrap_or(defaults.max_paths_per_dependency),
            env_include: config.env_include.unwrap_or(defaults.env_include),
            env_exclude: config.env_exclude.unwrap_or(defaults.env_exclude),
            checksum_workers: config.checksum_workers.unwrap_or(defaults.checksum_workers),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (field, value) in [
        ("max_path_length", config.max_path_length),
        ("max_paths_per_dependency", config.max_paths_per_dependency),
    ] {
        if value == Some(0) {
            bail!(
                "Invalid config: {} must be at least 1.\n\n\
                 💡 Hint: Remove the field to use the default of 50.",
                field
            );
        }
    }

    if let Some(workers) = config.checksum_workers {
        if workers == 0 || workers > MAX_CHECKSUM_WORKERS {
            bail!(
                "Invalid config: checksum_workers must be between 1 and {} (got {}).",
                MAX_CHECKSUM_WORKERS,
                workers
            );
        }
    }

    let patterns = config
        .env_include
        .iter()
        .chain(config.env_exclude.iter())
        .flatten();
    for (i, pattern) in patterns.enumerate() {
        if pattern.trim().is_empty() {
            bail!(
                "Invalid config: environment pattern #{} must not be empty.\n\n\
                 💡 Hint: Use glob patterns such as \"CI_*\" or \"*TOKEN*\".",
                i + 1
            );
        }
    }

    if let Some(dir) = &config.temp_dir {
        if dir.as_os_str().is_empty() {
            bail!("Invalid config: temp_dir must not be empty.");
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
