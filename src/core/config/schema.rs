//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$CARAVEL_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/caravel/config.toml`
//! 3. `~/.caravel/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `caravel.toml` in the project root.
//!
//! # Validation
//!
//! Config values are validated after parsing with the same validators
//! used for command-line input.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::validators::{contains, numeric, required, Validation, Validator};

/// Recognized build option value types.
pub const OPTION_TYPES: &[&str] = &["boolean", "string", "number"];

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// interactive = true
/// cordova_bin = "/usr/local/bin/cordova"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default interactive mode
    pub interactive: Option<bool>,

    /// Path or name of the Cordova executable
    pub cordova_bin: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bin) = &self.cordova_bin {
            check(required(bin, Some("cordova_bin")))?;
        }
        Ok(())
    }
}

/// Project configuration (`caravel.toml`).
///
/// # Example
///
/// ```toml
/// name = "field-notes"
///
/// [integrations.cordova]
/// root = "."
///
/// [build]
/// command = ["npm", "run", "build", "--"]
///
/// [[build.options]]
/// name = "prod"
/// summary = "Build the app for production"
/// type = "boolean"
/// default = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Native tool integrations
    pub integrations: IntegrationsConfig,

    /// Web asset build runner. Its presence enables the runner.
    pub build: Option<BuildConfig>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check(required(&self.name, Some("name")))?;

        if let Some(cordova) = &self.integrations.cordova {
            if let Some(root) = &cordova.root {
                check(required(root, Some("integrations.cordova.root")))?;
            }
        }

        if let Some(build) = &self.build {
            build.validate()?;
        }

        Ok(())
    }
}

/// Integration table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationsConfig {
    /// Cordova integration
    pub cordova: Option<IntegrationConfig>,
}

/// Settings for one native tool integration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationConfig {
    /// Integration root, relative to the project root (default: ".")
    pub root: Option<String>,

    /// Whether the integration is enabled (default: true)
    pub enabled: Option<bool>,
}

impl IntegrationConfig {
    /// Check if the integration is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Build runner settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Program and leading arguments (default: `npm run build`)
    pub command: Vec<String>,

    /// Options the runner contributes to commands that build
    pub options: Vec<BuildOptionConfig>,
}

impl BuildConfig {
    /// Validate the build settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.command.is_empty() {
            check(required(&self.command[0], Some("build.command")))?;
        }

        let option_type = contains(OPTION_TYPES.iter().copied());
        for option in &self.options {
            check(required(&option.name, Some("build.options.name")))?;
            check(option_type.validate(&option.kind, Some("build.options.type")))?;

            if option.kind == "number" {
                if let Some(default) = &option.default {
                    check(numeric(&default.to_string(), Some("build.options.default")))?;
                }
            }
        }

        Ok(())
    }
}

/// A runner-contributed option as declared in config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildOptionConfig {
    /// Option name (without leading dashes)
    pub name: String,

    /// One-line help text
    #[serde(default)]
    pub summary: String,

    /// Value type: "boolean", "string", or "number"
    #[serde(rename = "type", default = "default_option_type")]
    pub kind: String,

    /// Default value
    #[serde(default)]
    pub default: Option<DefaultValue>,

    /// Allowed values
    #[serde(default)]
    pub choices: Vec<String>,
}

fn default_option_type() -> String {
    "boolean".to_string()
}

/// A default value as written in TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Bool(b) => write!(f, "{}", b),
            DefaultValue::Integer(i) => write!(f, "{}", i),
            DefaultValue::Float(x) => write!(f, "{}", x),
            DefaultValue::Text(s) => write!(f, "{}", s),
        }
    }
}

fn check(result: Validation) -> Result<(), ConfigError> {
    result.into_result().map_err(ConfigError::InvalidValue)
}
