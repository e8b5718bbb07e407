//! `stache.toml` schema and loading

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE: &str = "stache.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub partials: PartialsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialsConfig {
    /// Relative paths are taken from the directory of the config file
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub stream: bool,
}

impl Config {
    /// Read and parse a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.partials.directory = config.partials.directory.map(|dir| {
            if dir.is_relative() {
                base.join(dir)
            } else {
                dir
            }
        });
        Ok(config)
    }

    /// Load the explicit config file, or `./stache.toml` when it exists
    ///
    /// An explicit path must exist; a missing default file yields the
    /// default configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
