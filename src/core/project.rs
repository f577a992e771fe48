//! core::project
//!
//! Project discovery and layout.
//!
//! A project is a directory holding a `caravel.toml`. Discovery walks up
//! from the working directory, so commands work from any subdirectory.
//!
//! # Example
//!
//! ```no_run
//! use caravel::core::project::Project;
//! use std::path::Path;
//!
//! if let Some(project) = Project::discover(Path::new(".")).unwrap() {
//!     println!("{} at {}", project.name(), project.root().display());
//! }
//! ```

use std::path::{Path, PathBuf};

use super::config::{Config, ConfigError, IntegrationConfig, ProjectConfig, PROJECT_CONFIG_FILE};

/// Name of the Cordova integration.
pub const CORDOVA: &str = "cordova";

/// Manifest file that marks a Cordova integration root.
pub const CORDOVA_MANIFEST: &str = "config.xml";

/// A loaded project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// Create a project from an already-loaded config.
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Find the project containing `start`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is found but cannot be loaded.
    pub fn discover(start: &Path) -> Result<Option<Self>, ConfigError> {
        for dir in start.ancestors() {
            if Config::has_project_config(dir) {
                return Self::load(dir).map(Some);
            }
        }
        Ok(None)
    }

    /// Load the project rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` has no `caravel.toml` or it cannot be loaded.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config = Config::read_project_config(&root.join(PROJECT_CONFIG_FILE))?;
        Ok(Self::new(root, config))
    }

    /// Re-read the project config from disk.
    ///
    /// Used where project state may have changed since the project was
    /// loaded (e.g. whether a build runner is configured).
    pub fn reload_config(&self) -> Result<ProjectConfig, ConfigError> {
        Config::read_project_config(&self.root.join(PROJECT_CONFIG_FILE))
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Project config as loaded.
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Look up an integration by name.
    pub fn integration(&self, name: &str) -> Option<&IntegrationConfig> {
        match name {
            CORDOVA => self.config.integrations.cordova.as_ref(),
            _ => None,
        }
    }

    /// Root directory of an integration, if it is configured.
    pub fn integration_root(&self, name: &str) -> Option<PathBuf> {
        self.integration(name).map(|integration| {
            let relative = integration.root.as_deref().unwrap_or(".");
            if relative == "." {
                self.root.clone()
            } else {
                self.root.join(relative)
            }
        })
    }
}
