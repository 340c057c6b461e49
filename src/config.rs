//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.dataset-catalog.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".dataset-catalog.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Catalog directory settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Log file layout.
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where the datasets live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog directory, relative to the working directory or absolute.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Create the directory when it does not exist.
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            create_if_missing: true,
        }
    }
}

fn default_directory() -> String {
    "datasets".to_string()
}

fn default_true() -> bool {
    true
}

/// Measurement log layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Header lines before the first record.
    #[serde(default = "default_header_lines")]
    pub header_lines: usize,

    /// Longitude and latitude must both exceed this to be kept.
    #[serde(default = "default_min_coordinate")]
    pub min_coordinate: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            header_lines: default_header_lines(),
            min_coordinate: default_min_coordinate(),
        }
    }
}

fn default_header_lines() -> usize {
    crate::trajectory::DEFAULT_HEADER_LINES
}

fn default_min_coordinate() -> f64 {
    crate::trajectory::DEFAULT_MIN_COORDINATE
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.dir {
            self.catalog.directory = dir.to_string_lossy().to_string();
        }

        if let Some(header_lines) = args.header_lines {
            self.trajectory.header_lines = header_lines;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
