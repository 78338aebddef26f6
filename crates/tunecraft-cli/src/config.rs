//! Server configuration.
//!
//! Values are layered, later sources winning:
//! built-in defaults, an optional JSON file, environment variables, and
//! finally command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tunecraft_spec::MAX_TONE_DURATION_SECONDS;

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable selecting the provider.
pub const ENV_PROVIDER: &str = "TUNECRAFT_PROVIDER";
/// Environment variable overriding the port.
pub const ENV_PORT: &str = "TUNECRAFT_PORT";
/// Environment variable pointing at a catalog JSON file.
pub const ENV_CATALOG: &str = "TUNECRAFT_CATALOG";
/// Environment variable holding the Mubert API key.
pub const ENV_MUBERT_KEY: &str = "MUBERT_API_KEY";
/// Environment variable holding the Suno API key.
pub const ENV_SUNO_KEY: &str = "SUNO_API_KEY";

/// Which music provider backs `/api/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Deterministic offline provider.
    #[default]
    Mock,
    /// Mubert text-to-music API.
    Mubert,
    /// Suno generation API.
    Suno,
}

impl ProviderKind {
    /// Returns the provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::Mubert => "mubert",
            ProviderKind::Suno => "suno",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "mubert" => Ok(ProviderKind::Mubert),
            "suno" => Ok(ProviderKind::Suno),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Provider name is not recognized.
    #[error("unknown provider '{0}' (expected mock, mubert, or suno)")]
    UnknownProvider(String),

    /// An environment variable could not be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// A numeric setting is out of range.
    #[error("invalid setting '{name}': {message}")]
    OutOfRange {
        /// Setting name.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Bind port.
    pub port: u16,
    /// Longest tone `/api/demo-audio` will render, in seconds.
    pub max_tone_seconds: f64,
    /// Longest track `/api/generate` accepts, in seconds.
    pub max_track_seconds: u32,
    /// Generations allowed per UTC day.
    pub daily_quota: u32,
    /// Provider backing `/api/generate`.
    pub provider: ProviderKind,
    /// Mubert API key.
    pub mubert_api_key: Option<String>,
    /// Suno API key.
    pub suno_api_key: Option<String>,
    /// Recover from provider failures with the mock provider.
    pub fallback_to_mock: bool,
    /// JSON file with genres, moods and templates.
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            max_tone_seconds: 30.0,
            max_track_seconds: 300,
            daily_quota: 10,
            provider: ProviderKind::Mock,
            mubert_api_key: None,
            suno_api_key: None,
            fallback_to_mock: true,
            catalog_path: None,
        }
    }
}

impl ServerConfig {
    /// Parse configuration from a JSON file. Missing fields keep defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PROVIDER) {
            self.provider = value.parse()?;
        }
        if let Some(value) = lookup(ENV_PORT) {
            self.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_PORT,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_CATALOG) {
            self.catalog_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_MUBERT_KEY).filter(|v| !v.is_empty()) {
            self.mubert_api_key = Some(value);
        }
        if let Some(value) = lookup(ENV_SUNO_KEY).filter(|v| !v.is_empty()) {
            self.suno_api_key = Some(value);
        }
        Ok(())
    }

    /// Checks that numeric limits are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_tone_seconds > 0.0 && self.max_tone_seconds <= MAX_TONE_DURATION_SECONDS) {
            return Err(ConfigError::OutOfRange {
                name: "max_tone_seconds",
                message: format!(
                    "{} is not within (0, {}]",
                    self.max_tone_seconds, MAX_TONE_DURATION_SECONDS
                ),
            });
        }
        if self.max_track_seconds == 0 {
            return Err(ConfigError::OutOfRange {
                name: "max_track_seconds",
                message: "must be at least 1".to_string(),
            });
        }
        if self.daily_quota == 0 {
            return Err(ConfigError::OutOfRange {
                name: "daily_quota",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Loads configuration from all layers.
    ///
    /// # Arguments
    /// * `config_path` - Optional JSON file
    /// * `host` - `--host` override
    /// * `port` - `--port` override
    pub fn load(config_path: Option<&Path>, host: Option<IpAddr>, port: Option<u16>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        if let Some(host) = host {
            config.host = host;
        }
        if let Some(port) = port {
            config.port = port;
        }
        config.validate()?;
        Ok(config)
    }
}
