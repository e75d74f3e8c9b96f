//! Application settings.
//!
//! Settings come from an optional TOML file (`construction_erp.toml`, or the path in
//! `CONSTRUCTION_ERP_CONFIG`) and are then overridden by the `BIND_ADDRESS` and
//! `DATABASE_URL` environment variables. A missing file is not an error; every key
//! has a default.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default settings file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "construction_erp.toml";

/// Top-level application settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address the HTTP server listens on
    pub bind_address: String,
    /// sea-orm connection URL
    pub database_url: String,
    /// Number of recent work logs shown on the work log page
    pub recent_limit: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            recent_limit: 20,
        }
    }
}

impl AppConfig {
    /// Applies `BIND_ADDRESS` / `DATABASE_URL` from the environment on top of `self`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind_address) = std::env::var("BIND_ADDRESS") {
            self.bind_address = bind_address;
        }
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            self.database_url = database_url;
        }
        self
    }
}

/// Parses settings from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })
}

/// Loads settings from a TOML file. A file that does not exist yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Loads settings from the default location and applies environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var("CONSTRUCTION_ERP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path)?.with_env_overrides();
    info!(bind_address = %config.bind_address, "Loaded application settings");
    Ok(config)
}
