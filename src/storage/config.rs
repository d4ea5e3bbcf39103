use super::Result;
use crate::api::client::ApiConfig;
use crate::api::transport::DEFAULT_TIMEOUT_SECS;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "cms-cli";
pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_PROFILE: &str = "default";

/// Keys accepted by [`Config::set_value`].
pub const PROFILE_KEYS: [&str; 5] = ["protocol", "host", "port", "version", "timeout_seconds"];

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Where the backend lives. The API key is deliberately not stored here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub version: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            port: 10105,
            version: "v1".to_string(),
            timeout_seconds: None,
        }
    }
}

impl Profile {
    pub fn to_api_config(&self, api_key: Option<String>) -> ApiConfig {
        ApiConfig {
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            port: self.port,
            version: self.version.clone(),
            api_key,
            timeout_seconds: self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: &str| StorageError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        match key {
            "protocol" => match value {
                "http" | "https" => self.protocol = value.to_string(),
                _ => return Err(invalid("expected http or https")),
            },
            "host" => {
                let host = value.trim();
                if host.is_empty() || host.contains('/') || host.contains(':') {
                    return Err(invalid("expected a bare host name"));
                }
                self.host = host.to_string();
            }
            "port" => {
                self.port = value
                    .parse::<u16>()
                    .ok()
                    .filter(|port| *port > 0)
                    .ok_or_else(|| invalid("expected a port number between 1 and 65535"))?;
            }
            "version" => {
                if value.trim().is_empty() || value.contains('/') {
                    return Err(invalid("expected a single path segment such as v1"));
                }
                self.version = value.trim().to_string();
            }
            "timeout_seconds" => {
                let seconds = value
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| invalid("expected a positive number of seconds"))?;
                self.timeout_seconds = Some(seconds);
            }
            _ => {
                return Err(StorageError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply the `set` rules to a profile read from disk.
    pub fn check(&self, name: &str) -> Result<()> {
        let mut values = vec![
            ("protocol", self.protocol.clone()),
            ("host", self.host.clone()),
            ("port", self.port.to_string()),
            ("version", self.version.clone()),
        ];
        if let Some(seconds) = self.timeout_seconds {
            values.push(("timeout_seconds", seconds.to_string()));
        }

        let mut scratch = Profile::default();
        for (key, value) in values {
            scratch.set(key, &value).map_err(|e| match e {
                StorageError::InvalidValue { reason, .. } => StorageError::InvalidValue {
                    key: format!("profiles.{}.{}", name, key),
                    reason,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("{}: {}", config_path.display(), e),
            })?;

        for (name, profile) in &config.profiles {
            profile.check(name)?;
        }
        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(Self::config_file_in(&config_dir.join(APP_DIR)))
    }

    pub fn config_file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Name of the profile to use: explicit, then the configured default.
    pub fn resolve_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
            .to_string()
    }

    /// The selected profile, or the built-in defaults when it is not stored.
    pub fn active_profile(&self, requested: Option<&str>) -> Profile {
        let name = self.resolve_profile_name(requested);
        self.get_profile(&name).cloned().unwrap_or_default()
    }

    /// Update one key of a profile, creating the profile if needed.
    pub fn set_value(&mut self, profile: &str, key: &str, value: &str) -> Result<()> {
        let mut updated = self.get_profile(profile).cloned().unwrap_or_default();
        updated.set(key, value)?;
        self.set_profile(profile.to_string(), updated);
        Ok(())
    }
}
