//! Runner settings.
//!
//! Layered with the `config` crate, lowest precedence first:
//! built-in defaults, an optional TOML file, `MUSIC_SMOKE_*` environment
//! variables. Command-line overrides are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use music_smoke_domain::validate_base_url;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Settings file picked up from the working directory if present.
pub const DEFAULT_CONFIG_FILE: &str = "music-smoke.toml";
/// Prefix of the environment variables read into settings.
pub const ENV_PREFIX: &str = "MUSIC_SMOKE";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// The base URL is not a usable http(s) URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A zero timeout would fail every request.
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Settings for a smoke run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SmokeSettings {
    /// Root URL of the service under test.
    pub base_url: String,
    /// Overrides every case's own timeout when set.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SmokeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl SmokeSettings {
    /// Loads settings from defaults, a settings file and the environment.
    ///
    /// With `config_file` set, that file must exist. Otherwise
    /// [`DEFAULT_CONFIG_FILE`] is read if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed.
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::from_sources(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(
        config_file: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, SettingsError> {
        let file = match config_file {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .add_source(file)
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Applies command-line overrides; `None` keeps the loaded value.
    #[must_use]
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    /// Parses and checks the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] if it does not parse or is
    /// not an http(s) URL with a host.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        validate_base_url(&url).map_err(|e| invalid(e.to_string()))?;
        Ok(url)
    }

    /// Returns the timeout override, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero override.
    pub fn timeout(&self) -> Result<Option<Duration>, SettingsError> {
        match self.timeout_secs {
            Some(0) => Err(SettingsError::ZeroTimeout),
            other => Ok(other.map(Duration::from_secs)),
        }
    }
}
