//! Configuration loading and data folder resolution
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables (`POKEDEX_DATA_FOLDER`, `POKEDEX_PORT`)
//! 3. TOML configuration file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error: the service logs a warning and starts
//! on defaults. A TOML file that exists but does not parse is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV: &str = "POKEDEX_DATA_FOLDER";

/// Environment variable naming the listen port
pub const PORT_ENV: &str = "POKEDEX_PORT";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Bootstrap configuration loaded from TOML
///
/// Every key is optional; anything left out falls through to the next
/// source in the priority order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding `t_pokemon.json` and `t_pokemon_detail.json`
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// HTTP bind address
    #[serde(default)]
    pub bind_address: Option<String>,

    /// Load the tables at startup rather than on first request (default true)
    #[serde(default)]
    pub preload: Option<bool>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from `path`, or from the platform default location
    ///
    /// A file that does not exist yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => {
                    warn!("Could not determine config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            warn!("Config file not found: {} (using defaults)", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded TOML configuration from {}", path.display());
        Ok(config)
    }
}

/// Platform config file path: `<config_dir>/pokedex/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pokedex").join("config.toml"))
}

/// Compiled default data folder
pub fn default_data_folder() -> PathBuf {
    PathBuf::from("./data")
}

/// Resolve the data folder following the priority order
pub fn resolve_data_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.data_folder {
        return path.clone();
    }

    // Priority 4: Compiled default
    default_data_folder()
}

/// Resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_folder: PathBuf,
    pub port: u16,
    pub bind_address: String,
    pub preload: bool,
    pub log_level: String,
}

/// Command-line overrides; `None` defers to lower-priority sources
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub no_preload: bool,
}

impl ServiceConfig {
    /// Merge CLI overrides, environment and TOML into final settings
    pub fn resolve(overrides: ConfigOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let data_folder =
            resolve_data_folder(overrides.data_folder.as_deref(), DATA_FOLDER_ENV, toml_config);

        let port = match overrides.port {
            Some(port) => port,
            None => match std::env::var(PORT_ENV) {
                Ok(raw) if !raw.is_empty() => raw
                    .parse::<u16>()
                    .map_err(|_| Error::Config(format!("{} is not a valid port: {}", PORT_ENV, raw)))?,
                _ => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let bind_address = overrides
            .bind_address
            .or_else(|| toml_config.bind_address.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let preload = !overrides.no_preload && toml_config.preload.unwrap_or(true);

        Ok(Self {
            data_folder,
            port,
            bind_address,
            preload,
            log_level: toml_config.logging.level.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(TomlConfig::default().logging.level, "info");
    }

    #[test]
    fn test_parse_full_toml() {
        let config = TomlConfig::from_toml_str(
            r#"
            data_folder = "/srv/pokedex/data"
            port = 8080
            bind_address = "0.0.0.0"
            preload = false

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_folder, Some(PathBuf::from("/srv/pokedex/data")));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.preload, Some(false));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.data_folder.is_none());
        assert!(config.port.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_data_folder() {
        assert_eq!(default_data_folder(), PathBuf::from("./data"));
    }
}
