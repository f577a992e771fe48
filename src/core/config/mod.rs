//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Caravel has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: `caravel.toml` at the project root
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$CARAVEL_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/caravel/config.toml`
//! 3. `~/.caravel/config.toml`
//!
//! # Project Config
//!
//! `caravel.toml` at the project root. [`crate::core::project::Project`]
//! reads it through [`Config::read_project_config`].
//!
//! # Example
//!
//! ```no_run
//! use caravel::core::config::Config;
//!
//! let config = Config::load().unwrap();
//!
//! println!("Interactive: {}", config.interactive());
//! println!("Cordova: {}", config.cordova_bin());
//! ```

pub mod schema;

pub use schema::{
    BuildConfig, BuildOptionConfig, DefaultValue, GlobalConfig, IntegrationConfig,
    IntegrationsConfig, ProjectConfig,
};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "caravel.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// User-level configuration, loaded once per invocation.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
}

impl Config {
    /// Load the global configuration from the first location that exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation. A missing config file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let global = match Self::global_config_location() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading global config");
                Self::read_global_config(&path)?
            }
            None => GlobalConfig::default(),
        };
        global.validate()?;
        Ok(Self { global })
    }

    /// First existing global config file, in lookup order.
    fn global_config_location() -> Option<PathBuf> {
        let candidates = [
            std::env::var_os("CARAVEL_CONFIG").map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME")
                .map(|xdg| PathBuf::from(xdg).join("caravel/config.toml")),
            dirs::home_dir().map(|home| home.join(".caravel/config.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Check whether `dir` holds a project config.
    pub fn has_project_config(dir: &Path) -> bool {
        dir.join(PROJECT_CONFIG_FILE).is_file()
    }

    /// Read and parse a global config file.
    fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read, parse and validate a project config file.
    pub fn read_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ProjectConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Check if interactive mode is enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Get the Cordova executable.
    ///
    /// Defaults to "cordova" if not configured.
    pub fn cordova_bin(&self) -> &str {
        self.global.cordova_bin.as_deref().unwrap_or("cordova")
    }
}
