//! Configuration file handling for camera-ipconfig.
//!
//! Loads configuration from `~/.config/camera-ipconfig/config.toml` or a
//! custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utility::DEFAULT_UTILITY_PATH;

/// Configuration file structure for camera-ipconfig.
/// Loaded from ~/.config/camera-ipconfig/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub utility: UtilityConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize)]
pub struct UtilityConfig {
    #[serde(default = "default_utility_path")]
    pub path: String,
}

/// Values passed to `/force` and `/persist` when not overridden on the
/// command line.
#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_subnet")]
    pub subnet: String,
    #[serde(default = "default_gateway")]
    pub gateway: String,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        UtilityConfig {
            path: default_utility_path(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            subnet: default_subnet(),
            gateway: default_gateway(),
        }
    }
}

fn default_utility_path() -> String {
    DEFAULT_UTILITY_PATH.to_string()
}

fn default_subnet() -> String {
    "255.255.0.0".to_string()
}

fn default_gateway() -> String {
    "0.0.0.0".to_string()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("camera-ipconfig").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/camera-ipconfig/config.toml")
        })
}
