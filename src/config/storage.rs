use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{bail, Context, Result};
use log::{info, debug};

use crate::utils::file_utils;
use super::types::ScannerConfig;

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match file_utils::extension_of(path).as_deref() {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            _ => bail!(
                "Unsupported config file {} (expected .toml, .json, .yaml or .yml)",
                path.display()
            ),
        }
    }

    /// Parse `content` in this format
    pub fn parse(&self, content: &str) -> Result<ScannerConfig> {
        let config = match self {
            ConfigFormat::Toml => toml::from_str(content).context("Invalid TOML config")?,
            ConfigFormat::Json => serde_json::from_str(content).context("Invalid JSON config")?,
            ConfigFormat::Yaml => serde_yaml::from_str(content).context("Invalid YAML config")?,
        };
        Ok(config)
    }

    /// Serialize `config` in this format
    pub fn serialize(&self, config: &ScannerConfig) -> Result<String> {
        let content = match self {
            ConfigFormat::Toml => toml::to_string_pretty(config).context("Failed to serialize TOML config")?,
            ConfigFormat::Json => serde_json::to_string_pretty(config).context("Failed to serialize JSON config")?,
            ConfigFormat::Yaml => serde_yaml::to_string(config).context("Failed to serialize YAML config")?,
        };
        Ok(content)
    }
}

/// Config file storage operations
#[derive(Debug)]
pub struct ConfigStorage {
    /// Path to the config file
    config_path: PathBuf,
}

impl ConfigStorage {
    /// Create a new config storage with the given path
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Load the config from disk; a missing file yields the defaults
    pub fn load(&self) -> Result<ScannerConfig> {
        let path = &self.config_path;
        debug!("Loading config from {}", path.display());

        let format = ConfigFormat::from_path(path)?;

        if !path.exists() {
            info!("Config file {} does not exist, using defaults", path.display());
            return Ok(ScannerConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = format
            .parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Save the config to disk
    pub fn save(&self, config: &ScannerConfig) -> Result<()> {
        let path = &self.config_path;
        debug!("Saving config to {}", path.display());

        let content = ConfigFormat::from_path(path)?.serialize(config)?;
        file_utils::write_string_to_file(path, &content)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Get the path to the config file
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
