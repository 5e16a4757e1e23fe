//! Configuration module for autodealer
//!
//! Settings are read from `<config dir>/autodealer/config.toml` and can be
//! overridden per invocation with `AUTODEALER_*` environment variables
//! (for example `AUTODEALER_BACKEND=http`).

mod setup;

pub use setup::first_time_setup;

use crate::session::Account;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Keys accepted by `config get` and `config set`
pub const KEYS: [&str; 6] = [
    "backend",
    "api_url",
    "listen",
    "data_dir",
    "notification_ttl_ms",
    "quiet",
];

/// Where the catalog lives
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Embedded database in the data directory
    #[default]
    Local,
    /// Remote catalog API at `api_url`
    Http,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Http => "http",
        })
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "http" => Ok(Self::Http),
            other => Err(ConfigError::Message(format!(
                "Invalid backend '{other}'. Use 'local' or 'http'"
            ))),
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DealerConfig {
    /// Catalog backend used by every command except `serve`
    pub backend: Backend,

    /// Base URL of the catalog API for the http backend
    pub api_url: String,

    /// Address `serve` listens on
    pub listen: String,

    /// Directory holding the catalog and session databases
    pub data_dir: Option<PathBuf>,

    /// How long notifications stay visible
    pub notification_ttl_ms: u64,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Accounts allowed to sign in
    pub accounts: Vec<Account>,
}

impl Default for DealerConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Local,
            api_url: "http://127.0.0.1:3000".to_string(),
            listen: "127.0.0.1:3000".to_string(),
            data_dir: None,
            notification_ttl_ms: 3000,
            quiet: false,
            accounts: Account::defaults(),
        }
    }
}

impl DealerConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("autodealer").join("config.toml"))
    }

    /// Load configuration from the default path, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` plus the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(path, Self::environment())
    }

    /// Load configuration, running first-time setup if the file doesn't exist
    ///
    /// Setup only prompts when `interactive` is set; otherwise defaults are
    /// written silently.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup(interactive: bool) -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        if !config_path.exists() && interactive {
            first_time_setup(&config_path)?;
        }
        Self::load_from(&config_path)
    }

    fn environment() -> Environment {
        Environment::with_prefix("AUTODEALER").try_parsing(true)
    }

    fn build(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Directory for the databases, defaulting to the system data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no data directory is configured and the
    /// system one cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("autodealer"))
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
    }

    /// Path of the catalog database
    ///
    /// # Errors
    ///
    /// See [`data_dir`](Self::data_dir).
    pub fn catalog_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join("catalog"))
    }

    /// Path of the session database
    ///
    /// # Errors
    ///
    /// See [`data_dir`](Self::data_dir).
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join("session"))
    }

    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Read a single setting as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown key.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "backend" => self.backend.to_string(),
            "api_url" => self.api_url.clone(),
            "listen" => self.listen.clone(),
            "data_dir" => self.data_dir()?.display().to_string(),
            "notification_ttl_ms" => self.notification_ttl_ms.to_string(),
            "quiet" => self.quiet.to_string(),
            _ => return Err(unknown_key(key)),
        })
    }

    /// Change a single setting in memory; call [`save`](Self::save) to persist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "backend" => self.backend = value.parse()?,
            "api_url" => self.api_url = value.to_string(),
            "listen" => self.listen = value.to_string(),
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "notification_ttl_ms" => {
                self.notification_ttl_ms = value.parse().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for notification_ttl_ms: '{value}'. Use a number of milliseconds"
                    ))
                })?;
            }
            "quiet" => {
                self.quiet = value.parse().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                    ))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::NotFound(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        KEYS.join(", ")
    ))
}
