//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates the
//! file-level settings of an orglangs run.

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::pacing::PacingConfig;
use crate::persistence::{find_config_file, read_config_file};

/// Default number of repositories processed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default base URL of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The main configuration struct for orglangs.
///
/// # Examples
///
/// ```
/// use orglangs_config::{Config, PacingConfig};
///
/// // Create a default config
/// let config = Config::default();
/// assert_eq!(config.batch_size, 10);
///
/// // Create a custom config
/// let config = Config {
///     batch_size: 25,
///     pacing: PacingConfig::new(0, 100),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// GitHub token.
    ///
    /// If not set, the application will try to get a token from the `gh` CLI.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Number of repositories fetched per batch; output is flushed after
    /// every batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Base URL of the REST API, e.g. `https://ghe.example.com/api/v3`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Delays between successful requests.
    #[serde(default)]
    pub pacing: PacingConfig,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            batch_size: DEFAULT_BATCH_SIZE,
            api_url: default_api_url(),
            pacing: PacingConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./orglangs.json5` or `./orglangs.json`
    /// 2. User: `~/.config/orglangs/config.json5` or `~/.config/orglangs/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use orglangs_config::Config;
    ///
    /// # fn example() -> orglangs_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Batches of {} repositories", config.batch_size);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use orglangs_config::Config;
    ///
    /// # fn example() -> orglangs_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch size is zero, a pacing delay is out of
    /// bounds, or the API URL is not an HTTP(S) URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use orglangs_config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.batch_size = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        validate_batch_size(self.batch_size)?;
        validate_api_url(&self.api_url)?;
        self.pacing.validate()?;
        Ok(())
    }
}

/// Checks that a batch size is at least 1.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBatchSize`] for zero.
pub fn validate_batch_size(batch_size: usize) -> Result<()> {
    if batch_size == 0 {
        return Err(ConfigError::InvalidBatchSize(batch_size));
    }
    Ok(())
}

/// Checks that an API base URL uses HTTP or HTTPS.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidApiUrl`] otherwise.
pub fn validate_api_url(api_url: &str) -> Result<()> {
    if api_url.starts_with("https://") || api_url.starts_with("http://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidApiUrl(api_url.to_string()))
    }
}
