use libnamecheck::tlds::default_tlds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config path")]
    NoConfigDir,
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// TLDs checked when `--tlds` is not given.
    #[serde(default = "default_tlds")]
    pub tlds: Vec<String>,
    /// Provider keys skipped unless `--skip` is given.
    #[serde(default)]
    pub skip: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tlds: default_tlds(),
            skip: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("namecheck").join("config.toml"))
}

pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Falls back to defaults when the file is missing or unreadable.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    read_config(&path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        Config::default()
    })
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    let io_err = |source| ConfigError::Io {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(&path, default_config_toml()).map_err(io_err)?;
    Ok(path)
}

pub fn default_config_toml() -> String {
    r#"# namecheck configuration

# TLDs checked for every name unless --tlds is given
tlds = ["com", "io", "org", "dev", "ai"]

# Providers to skip unless --skip is given: comfy, pypi, npm, github, domain
skip = []

# Per-request timeout in seconds
timeout_secs = 10
"#
    .to_string()
}
