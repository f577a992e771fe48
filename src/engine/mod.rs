//! engine
//!
//! Orchestrates the command lifecycle: Gate -> Resolve -> Evaluate -> Build -> Delegate.
//!
//! # Architecture
//!
//! 1. **Gate**: Scan the project for capabilities and check the command's
//!    requirements
//! 2. **Resolve**: Build the command's metadata (static options plus
//!    runner-contributed ones) and validate arguments against it
//! 3. **Evaluate**: Check the requested platform, offering to install it
//! 4. **Build**: Build web assets when a platform is known and the build
//!    is not turned off
//! 5. **Delegate**: Hand the filtered arguments to the native tool
//!
//! # Invariants
//!
//! - Gating failure aborts before any collaborator is called
//! - Phases run strictly in order; every collaborator call is awaited
//! - Collaborator errors propagate unchanged
//! - Warnings never change the outcome's success

pub mod capabilities;
pub mod command;
pub mod gate;
pub mod lifecycle;
pub mod metadata;
pub mod options;
pub mod plan;
pub mod runner;
pub mod scan;

pub use capabilities::{Capability, CapabilitySet};
pub use command::Command;
pub use gate::{gate, GateFailure, GateResult, RequirementSet};
pub use lifecycle::{Lifecycle, LifecycleState, TransitionError};
pub use metadata::{CommandMetadata, CommandOption, OptionIntent, OptionType, OptionValue};
pub use options::{parse_args, ArgsError, BuildOptions, CommandLineOptions, ParsedArgs};
pub use plan::{BuildDecision, BuildStatus, ExecutionPlan};
pub use runner::{run_command, RunError};
pub use scan::{scan, ProjectSnapshot};

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::core::config::Config;
use crate::integration::mock::MockIntegration;
use crate::integration::{
    Builder, ConfigRunnerProvider, CordovaPlatforms, CordovaTool, ExternalTool, PlatformStore,
    RunnerProvider, ScriptBuilder,
};
use crate::ui::prompts::{Prompt, TerminalPrompt};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
    /// Accept confirmation prompts without asking.
    pub assume_yes: bool,
    /// Global configuration, loaded once per invocation.
    pub config: Config,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
            assume_yes: false,
            config: Config::default(),
        }
    }
}

/// An unrecoverable condition reported to the user.
///
/// Displayed as the message, followed by the hint on its own line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}{}", .hint.as_ref().map(|h| format!("\n{}", h)).unwrap_or_default())]
pub struct FatalError {
    /// What went wrong.
    pub message: String,
    /// What the user can do about it.
    pub hint: Option<String>,
}

impl FatalError {
    /// Create a fatal error without a hint.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// The collaborators a command lifecycle talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub runners: Arc<dyn RunnerProvider>,
    pub platforms: Arc<dyn PlatformStore>,
    pub builder: Arc<dyn Builder>,
    pub tool: Arc<dyn ExternalTool>,
    pub prompt: Arc<dyn Prompt>,
}

impl Collaborators {
    /// Real collaborators: Cordova from the global config, the `[build]`
    /// script runner, and the terminal prompt.
    pub fn cordova(ctx: &Context) -> Self {
        let cordova_bin = ctx.config.cordova_bin();
        Self {
            runners: Arc::new(ConfigRunnerProvider::new()),
            platforms: Arc::new(CordovaPlatforms::new(cordova_bin)),
            builder: Arc::new(ScriptBuilder::new()),
            tool: Arc::new(CordovaTool::new(cordova_bin)),
            prompt: Arc::new(TerminalPrompt::new(ctx.interactive, ctx.assume_yes)),
        }
    }

    /// Every integration collaborator backed by one mock.
    pub fn mock(mock: &MockIntegration, prompt: impl Prompt + 'static) -> Self {
        Self {
            runners: Arc::new(mock.clone()),
            platforms: Arc::new(mock.clone()),
            builder: Arc::new(mock.clone()),
            tool: Arc::new(mock.clone()),
            prompt: Arc::new(prompt),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("tool", &self.tool.name())
            .finish_non_exhaustive()
    }
}
