mod error;
#[cfg(test)]
mod tests;

pub use error::*;

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_ADDRESS: &str = "http://localhost:8080/";
pub const ADDRESS_ENV: &str = "QUERYTAIL_ADDRESS";
pub const TOKEN_ENV: &str = "QUERYTAIL_TOKEN";

/// Where and as whom to talk to the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default)]
    pub token: Option<String>,
}

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            token: None,
        }
    }
}

/// Explicit values that beat both the file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub address: Option<String>,
    pub token: Option<String>,
}

impl ClientConfig {
    /// `~/.querytail/config.yaml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".querytail").join("config.yaml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_yaml(path, &contents)
    }

    fn from_yaml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        // An empty file is valid and means "all defaults".
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| ConfigError::parse(path, e))
    }

    /// Resolves the effective config: file, then environment, then overrides.
    ///
    /// An explicit `path` must exist. The default file is optional.
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) => match Self::from_file(&default) {
                    Err(ConfigError::ReadFile { source, .. })
                        if source.kind() == io::ErrorKind::NotFound =>
                    {
                        tracing::debug!(path = %default.display(), "no config file, using defaults");
                        Self::default()
                    }
                    other => other?,
                },
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub(crate) fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(address) = lookup(ADDRESS_ENV).filter(|v| !v.is_empty()) {
            self.address = address;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
    }

    pub(crate) fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(address) = overrides.address {
            self.address = address;
        }
        if let Some(token) = overrides.token {
            self.token = Some(token);
        }
    }
}
