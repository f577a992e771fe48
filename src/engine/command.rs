//! engine::command
//!
//! Command trait for lifecycle integration.
//!
//! # Architecture
//!
//! Every command that runs through [`run_command`](super::runner::run_command)
//! implements [`Command`]:
//!
//! 1. Commands declare their required capabilities statically
//! 2. `pre_run` gates on them (the default scans and gates)
//! 3. `metadata` is resolved fresh for every invocation
//! 4. `run` receives the snapshot, validated arguments and the lifecycle,
//!    and advances the lifecycle through its own phases
//!
//! # Invariants
//!
//! - `run` is only called after gating passed and arguments validated
//! - `run` leaves the lifecycle in `Delegated` or `Done`

use async_trait::async_trait;

use super::gate::{gate, GateResult, RequirementSet};
use super::lifecycle::Lifecycle;
use super::metadata::CommandMetadata;
use super::options::ParsedArgs;
use super::runner::RunError;
use super::scan::{scan, ProjectSnapshot};
use crate::core::project::Project;

/// A command that runs through the engine lifecycle.
#[async_trait]
pub trait Command: Send + Sync {
    /// Capabilities that must hold before the command runs.
    const REQUIREMENTS: &'static RequirementSet;

    /// Output type produced by this command.
    type Output: Send;

    /// Project the command runs against, if one was discovered.
    fn project(&self) -> Option<&Project>;

    /// Resolve the command's metadata.
    async fn metadata(&self) -> Result<CommandMetadata, RunError>;

    /// Project-level checks before anything else happens.
    async fn pre_run(&self) -> Result<ProjectSnapshot, RunError> {
        match gate(scan(self.project()), Self::REQUIREMENTS) {
            GateResult::Ready(snapshot) => Ok(snapshot),
            GateResult::Blocked(failure) => Err(failure.to_fatal().into()),
        }
    }

    /// Execute the command.
    async fn run(
        &self,
        snapshot: ProjectSnapshot,
        args: ParsedArgs,
        metadata: &CommandMetadata,
        lifecycle: &mut Lifecycle,
    ) -> Result<Self::Output, RunError>;
}
