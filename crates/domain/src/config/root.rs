use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "dnsrelay.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dnsrelay/config.toml";

/// Main configuration structure for dnsrelay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket and task limits
    #[serde(default)]
    pub server: ServerConfig,

    /// The resolver cache misses are forwarded to
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Answer cache policy and persistence
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsrelay.toml in current directory
    /// 3. /etc/dnsrelay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.resolver = upstream;
        }
        if let Some(path) = overrides.snapshot_path {
            self.cache.snapshot_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.max_inflight == 0 {
            return Err(ConfigError::Validation(
                "max_inflight must be at least 1".to_string(),
            ));
        }

        if self.upstream.resolver.port() == 0 {
            return Err(ConfigError::Validation(format!(
                "Upstream resolver {} has no port",
                self.upstream.resolver
            )));
        }

        if self.cache.max_age_secs == 0 {
            return Err(ConfigError::Validation(
                "cache max_age_secs cannot be 0".to_string(),
            ));
        }

        if self.cache.snapshot_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cache snapshot_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream: Option<SocketAddr>,
    pub snapshot_path: Option<String>,
    pub log_level: Option<String>,
}
