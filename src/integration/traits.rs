//! integration::traits
//!
//! Collaborator traits for native tool integrations.
//!
//! # Design
//!
//! Every interaction with the outside world during a command lifecycle
//! goes through one of these traits: querying the build runner for
//! options, discovering and installing platforms, building web assets,
//! and delegating to the native tool. All are async because they involve
//! process or filesystem I/O, and all return `Result` so failures
//! propagate unchanged to the lifecycle.
//!
//! # Example
//!
//! ```ignore
//! use caravel::integration::{PlatformStore, IntegrationError};
//! use std::path::Path;
//!
//! async fn has_ios(store: &dyn PlatformStore, root: &Path) -> Result<bool, IntegrationError> {
//!     Ok(store.platforms(root).await?.contains("ios"))
//! }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::core::project::Project;
use crate::engine::metadata::CommandOption;
use crate::engine::options::BuildOptions;

/// Errors from integration collaborators.
#[derive(Debug, Clone, Error)]
pub enum IntegrationError {
    /// The integration root is missing or not a directory.
    #[error("integration root '{0}' is not a directory")]
    InvalidRoot(PathBuf),

    /// An external program could not be started.
    #[error("failed to run '{program}': {message}")]
    SpawnFailed {
        /// Program that failed to start
        program: String,
        /// Reason reported by the OS
        message: String,
    },

    /// An external program exited unsuccessfully.
    #[error("'{command}' failed ({status})")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit status description
        status: String,
    },

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(String),

    /// Project configuration could not be read.
    #[error("config error: {0}")]
    Config(String),

    /// The build runner reported an error.
    #[error("runner error: {0}")]
    Runner(String),
}

/// A project's build runner: contributes options to commands that build.
#[async_trait]
pub trait Runner: Send + Sync {
    /// Runner name, for logs.
    fn name(&self) -> &str;

    /// Options this runner adds to commands that build.
    async fn options(&self) -> Result<Vec<CommandOption>, IntegrationError>;
}

/// Looks up the build runner for a project.
#[async_trait]
pub trait RunnerProvider: Send + Sync {
    /// Get the project's runner, or `None` if it has none.
    ///
    /// Implementations must not cache: runner availability depends on
    /// project state that can change between invocations.
    async fn build_runner(&self, project: &Project)
        -> Result<Option<Box<dyn Runner>>, IntegrationError>;
}

/// Discovers and installs native platforms under an integration root.
#[async_trait]
pub trait PlatformStore: Send + Sync {
    /// Names of the platforms currently installed.
    async fn platforms(&self, root: &Path) -> Result<BTreeSet<String>, IntegrationError>;

    /// Install a platform.
    async fn install(&self, platform: &str, root: &Path) -> Result<(), IntegrationError>;
}

/// A request to build web assets.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    /// Positional inputs of the invoking command
    pub inputs: Vec<String>,
    /// Options filtered for the build
    pub options: BuildOptions,
}

/// Builds web assets before the native tool runs.
#[async_trait]
pub trait Builder: Send + Sync {
    /// Run the build.
    async fn build(&self, project: &Project, request: &BuildRequest) -> Result<(), IntegrationError>;
}

/// Extra settings for a native tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOptions {
    /// Directory the tool runs in (the integration root)
    pub cwd: PathBuf,
}

/// The native tool commands are delegated to.
#[async_trait]
pub trait ExternalTool: Send + Sync {
    /// Tool name, for messages.
    fn name(&self) -> &str;

    /// Run the tool with `args`.
    async fn run(&self, args: &[String], extra: &ToolOptions) -> Result<(), IntegrationError>;
}
