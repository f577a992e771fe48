//! integration
//!
//! Native tool integrations.
//!
//! # Modules
//!
//! - [`traits`] - Collaborator traits and `IntegrationError`
//! - [`cordova`] - Cordova platform store and external tool
//! - [`script`] - Build runner and builder from the project's `[build]` table
//! - [`mock`] - Recording mock for deterministic tests

pub mod cordova;
pub mod mock;
pub mod script;
pub mod traits;

pub use cordova::{CordovaPlatforms, CordovaTool};
pub use script::{ConfigRunnerProvider, ScriptBuilder};
pub use traits::{
    BuildRequest, Builder, ExternalTool, IntegrationError, PlatformStore, Runner, RunnerProvider,
    ToolOptions,
};
