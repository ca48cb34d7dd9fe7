//! Configuration handling for askq
//!
//! Settings are read from `<config_dir>/askq/config.toml` when it exists, or
//! from the file passed with `--config`. Every field has a default, so an
//! empty file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SpecError;

/// askq configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Answer and schema output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Interactive prompt settings
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Indent JSON output even without `--pretty`
    #[serde(default)]
    pub pretty: bool,
}

/// Prompt settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PromptConfig {
    /// Terminal device prompts are drawn on instead of `/dev/tty` (Unix only)
    #[serde(default)]
    pub tty_device: Option<String>,
}

impl Config {
    /// Default location of the user config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("askq").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present and defaults apply otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SpecError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(SpecError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Parse a config file
    pub fn load_from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpecError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&content)
            .map_err(|e| SpecError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
