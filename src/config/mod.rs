//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `LODESTAR_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_EMBED_PREFIX_CHARS, DEFAULT_FETCH_LIMIT,
    DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_RESULT_TTL_SECS, DEFAULT_SUGGESTION_TTL_SECS,
    MAX_FETCH_LIMIT,
};
use crate::provider::SafetyLevel;

/// Engine/server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LODESTAR_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Base URL of the search provider (SearxNG-style JSON API).
    /// Default: `http://localhost:8888`.
    pub provider_url: String,

    /// Budget for a single provider call. Default: 10s.
    pub provider_timeout: Duration,

    /// Provider-side content safety level. Default: moderate.
    pub safety_level: SafetyLevel,

    /// Path to the embedding model directory (`config.json`,
    /// `model.safetensors`, `tokenizer.json`). Stub encoder when unset.
    pub model_dir: Option<PathBuf>,

    /// Path to a disallowed-term blocklist file (one term per line,
    /// `#` comments). No filtering when unset.
    pub blocklist_path: Option<PathBuf>,

    /// Candidates requested from the provider per query. Default: `10`,
    /// capped at [`MAX_FETCH_LIMIT`].
    pub fetch_limit: usize,

    /// Chars of a document body embedded for ranking. Default: `300`.
    pub embed_prefix_chars: usize,

    /// TTL for cached ranked results. Default: 300s.
    pub result_ttl: Duration,

    /// TTL for cached suggestions. Default: 600s.
    pub suggestion_ttl: Duration,

    /// Max entries per cache (LRU bound). Default: `10_000`.
    pub cache_capacity: u64,
}

/// Default provider URL used when `LODESTAR_PROVIDER_URL` is not set.
pub const DEFAULT_PROVIDER_URL: &str = "http://localhost:8888";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            safety_level: SafetyLevel::Moderate,
            model_dir: None,
            blocklist_path: None,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            embed_prefix_chars: DEFAULT_EMBED_PREFIX_CHARS,
            result_ttl: Duration::from_secs(DEFAULT_RESULT_TTL_SECS),
            suggestion_ttl: Duration::from_secs(DEFAULT_SUGGESTION_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "LODESTAR_PORT";
    const ENV_BIND_ADDR: &'static str = "LODESTAR_BIND_ADDR";
    const ENV_PROVIDER_URL: &'static str = "LODESTAR_PROVIDER_URL";
    const ENV_PROVIDER_TIMEOUT_SECS: &'static str = "LODESTAR_PROVIDER_TIMEOUT_SECS";
    const ENV_SAFETY_LEVEL: &'static str = "LODESTAR_SAFETY_LEVEL";
    const ENV_MODEL_DIR: &'static str = "LODESTAR_MODEL_DIR";
    const ENV_BLOCKLIST_PATH: &'static str = "LODESTAR_BLOCKLIST_PATH";
    const ENV_FETCH_LIMIT: &'static str = "LODESTAR_FETCH_LIMIT";
    const ENV_EMBED_PREFIX_CHARS: &'static str = "LODESTAR_EMBED_PREFIX_CHARS";
    const ENV_RESULT_TTL_SECS: &'static str = "LODESTAR_RESULT_TTL_SECS";
    const ENV_SUGGESTION_TTL_SECS: &'static str = "LODESTAR_SUGGESTION_TTL_SECS";
    const ENV_CACHE_CAPACITY: &'static str = "LODESTAR_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let provider_url =
            Self::parse_string_from_env(Self::ENV_PROVIDER_URL, defaults.provider_url);
        let provider_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_PROVIDER_TIMEOUT_SECS,
            DEFAULT_PROVIDER_TIMEOUT_SECS,
        ));
        let safety_level = Self::parse_safety_level_from_env(defaults.safety_level)?;
        let model_dir = Self::parse_optional_path_from_env(Self::ENV_MODEL_DIR);
        let blocklist_path = Self::parse_optional_path_from_env(Self::ENV_BLOCKLIST_PATH);
        let fetch_limit =
            Self::parse_usize_from_env(Self::ENV_FETCH_LIMIT, defaults.fetch_limit)
                .clamp(1, MAX_FETCH_LIMIT);
        let embed_prefix_chars = Self::parse_usize_from_env(
            Self::ENV_EMBED_PREFIX_CHARS,
            defaults.embed_prefix_chars,
        );
        let result_ttl = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_RESULT_TTL_SECS,
            DEFAULT_RESULT_TTL_SECS,
        ));
        let suggestion_ttl = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_SUGGESTION_TTL_SECS,
            DEFAULT_SUGGESTION_TTL_SECS,
        ));
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);

        Ok(Self {
            port,
            bind_addr,
            provider_url,
            provider_timeout,
            safety_level,
            model_dir,
            blocklist_path,
            fetch_limit,
            embed_prefix_chars,
            result_ttl,
            suggestion_ttl,
            cache_capacity,
        })
    }

    /// Validates paths and basic invariants (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_url.trim().is_empty() {
            return Err(ConfigError::InvalidProviderUrl {
                value: self.provider_url.clone(),
            });
        }

        if let Some(ref path) = self.model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.blocklist_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Reads the disallowed-term list from `blocklist_path`.
    ///
    /// Returns an empty list when no blocklist is configured. Blank lines and
    /// `#` comments are skipped.
    pub fn load_blocklist(&self) -> Result<Vec<String>, ConfigError> {
        let Some(ref path) = self.blocklist_path else {
            return Ok(Vec::new());
        };

        let content = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::BlocklistReadFailed {
                path: path.clone(),
                source,
            }
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_safety_level_from_env(default: SafetyLevel) -> Result<SafetyLevel, ConfigError> {
        match env::var(Self::ENV_SAFETY_LEVEL) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidSafetyLevel { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
