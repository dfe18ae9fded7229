//! Admin tool configuration management

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use persistence::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when none is given (any supported extension)
pub const DEFAULT_CONFIG_FILE: &str = "player-admin";

/// Prefix for environment overrides, e.g. `PLAYER_ADMIN_STORE__PATH`
pub const ENV_PREFIX: &str = "PLAYER_ADMIN";

/// Main admin configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Record store location and encoding
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, pretty, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

/// Load configuration from defaults, a config file and environment variables
///
/// Later sources win. An explicit `file` must exist; the default file is optional.
pub fn load_config(file: Option<&Path>) -> Result<AdminConfig> {
    let defaults = AdminConfig::default();

    let mut builder = Config::builder()
        .set_default("store.path", defaults.store.path.to_string_lossy().into_owned())?
        .set_default("store.format", defaults.store.format.to_string())?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.format", defaults.logging.format)?;

    builder = match file {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
    };

    builder = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"));

    let config: AdminConfig = builder
        .build()
        .context("Failed to read configuration sources")?
        .try_deserialize()
        .context("Invalid configuration values")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &AdminConfig) -> Result<()> {
    config.store.validate().map_err(anyhow::Error::msg)?;

    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "compact" | "pretty" | "json" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    Ok(())
}
