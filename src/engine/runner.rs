//! engine::runner
//!
//! Engine runner - the single entry point for command execution.
//!
//! # Architecture
//!
//! ```text
//! pre_run (gate) -> metadata + arguments -> run -> Done
//! ```
//!
//! # Invariants
//!
//! - Gating is always performed before metadata is resolved
//! - Any error moves the lifecycle to `FatalAborted` and propagates as is
//! - A successful run always ends in `Done`
//!
//! # Example
//!
//! ```ignore
//! use caravel::engine::lifecycle::Lifecycle;
//! use caravel::engine::runner::run_command;
//!
//! let mut lifecycle = Lifecycle::new();
//! let outcome = run_command(&command, &tokens, &mut lifecycle).await?;
//! ```

use thiserror::Error;

use super::command::Command;
use super::lifecycle::{Lifecycle, LifecycleState, TransitionError};
use super::options::{parse_args, ArgsError};
use super::FatalError;
use crate::core::config::ConfigError;
use crate::integration::IntegrationError;
use crate::ui::prompts::PromptError;

/// Errors from the engine runner.
#[derive(Debug, Error)]
pub enum RunError {
    /// The command cannot proceed; shown to the user as is.
    #[error(transparent)]
    Fatal(#[from] FatalError),

    /// A collaborator failed.
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    /// The prompt failed or was cancelled.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Arguments did not match the metadata.
    #[error(transparent)]
    Args(#[from] ArgsError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command broke the lifecycle order.
    #[error("internal error: {0}")]
    Transition(#[from] TransitionError),
}

impl RunError {
    /// Check if this is a fatal abort.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RunError::Fatal(_))
    }
}

/// Run a command through the full lifecycle.
///
/// `tokens` are the raw arguments after the command name. On error the
/// lifecycle is aborted before the error is returned.
pub async fn run_command<C: Command>(
    command: &C,
    tokens: &[String],
    lifecycle: &mut Lifecycle,
) -> Result<C::Output, RunError> {
    let result = run_phases(command, tokens, lifecycle).await;
    if let Err(err) = &result {
        tracing::debug!(error = %err, state = %lifecycle.state(), "command failed");
        lifecycle.abort();
    }
    result
}

async fn run_phases<C: Command>(
    command: &C,
    tokens: &[String],
    lifecycle: &mut Lifecycle,
) -> Result<C::Output, RunError> {
    let snapshot = command.pre_run().await?;
    lifecycle.advance(LifecycleState::PreRunChecked)?;

    let metadata = command.metadata().await?;
    let args = parse_args(&metadata, tokens)?;
    lifecycle.advance(LifecycleState::MetadataResolved)?;

    let output = command.run(snapshot, args, &metadata, lifecycle).await?;
    if lifecycle.state() != LifecycleState::Done {
        lifecycle.advance(LifecycleState::Done)?;
    }
    Ok(output)
}
