//! Configuration loader
//!
//! Uses Figment to merge, later sources overriding earlier ones:
//!
//! 1. `AppConfig::default()`
//! 2. the TOML file (explicit path, or the first discovered candidate)
//! 3. environment variables such as `RULEGEN__GENERATOR__INDENT=4`

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rulegen_domain::{Error, Result};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::logging::parse_log_level;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix, including the trailing separator
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Use this file instead of searching the default locations
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load and validate configuration from all sources
    ///
    /// An explicit config path that does not exist is an error; a missing
    /// default file is not.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                figment = figment.merge(Toml::file(path));
                info!(path = %path.display(), "Configuration loaded");
            }
            None => {
                if let Some(path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&path));
                    info!(path = %path.display(), "Configuration loaded");
                }
            }
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix).split(CONFIG_ENV_SEPARATOR));

        let config: AppConfig = figment
            .extract()
            .map_err(|e| Error::config(format!("Failed to extract configuration: {e}")))?;
        validate_app_config(&config)?;
        Ok(config)
    }

    /// Write a configuration as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize config to TOML: {e}")))?;
        std::fs::write(path, text).map_err(|e| Error::io(path, e))
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        let found = candidates.into_iter().flatten().find(|path| path.exists());
        if found.is_none() {
            debug!("No configuration file found, using defaults");
        }
        found
    }
}

/// Validate every configuration section
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    config.generator.validate()?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}
