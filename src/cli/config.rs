//! Configuration file support.

use serde::{Deserialize, Serialize};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::api::DEFAULT_HOST;

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Application configuration loaded from config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Long-lived API token issued by pairing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Host the application listens on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Fixed port, skipping the scan of the default range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/joplink/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("joplink")
            .join("config.toml")
    }

    /// Load configuration from `path`.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.into(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })
    }

    /// Writes the configuration to `path` atomically, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.into(),
            source,
        })?;

        let content = toml::to_string_pretty(self)?;
        let mut temp = NamedTempFile::new_in(parent).map_err(|source| ConfigError::Io {
            path: path.into(),
            source,
        })?;
        temp.write_all(content.as_bytes())
            .map_err(|source| ConfigError::Io {
                path: path.into(),
                source,
            })?;
        temp.persist(path).map_err(|e| ConfigError::AtomicWrite {
            path: path.into(),
            source: e.error,
        })?;

        Ok(())
    }

    /// Resolve the host, falling back to `localhost`.
    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HOST)
    }

    /// Resolve the port, with CLI argument taking precedence.
    ///
    /// `None` means scanning the default range.
    pub fn port(&self, cli_port: Option<u16>) -> Option<u16> {
        cli_port.or(self.port)
    }

    /// The stored API token, if any non-empty one is set.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.is_empty())
    }
}
