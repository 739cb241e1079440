use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverSettings;

const LOCAL_CONFIG: &str = "ferrous-resolv.toml";
const SYSTEM_CONFIG: &str = "/etc/ferrous-resolv/config.toml";
const SYSTEM_RESOLV_CONF: &str = "/etc/resolv.conf";

/// Main configuration structure for Ferrous Resolv
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Name server, search suffix and retransmission schedule
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-resolv.toml in current directory
    /// 3. /etc/ferrous-resolv/config.toml
    /// 4. /etc/resolv.conf
    /// 5. Default configuration (no name server)
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)?
        } else if Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)?
        } else if Path::new(SYSTEM_RESOLV_CONF).exists() {
            Self::from_resolv_conf_file(SYSTEM_RESOLV_CONF)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build a configuration from a resolv.conf style file
    pub fn from_resolv_conf_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Ok(Self {
            resolver: ResolverSettings::from_resolv_conf(&contents),
            logging: LoggingConfig::default(),
        })
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(nameserver) = overrides.nameserver {
            self.resolver.nameserver = Some(nameserver);
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(search) = overrides.search {
            self.resolver.search = Some(search);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate().map_err(ConfigError::Validation)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub nameserver: Option<IpAddr>,
    pub port: Option<u16>,
    pub search: Option<String>,
    pub log_level: Option<String>,
}
