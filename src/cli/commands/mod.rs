//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and discovers the project
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Collaborators are async (process and filesystem I/O). Handlers stay
//! sync and drive the engine on a `tokio::runtime::Runtime` they create.

mod completion;
mod describe;
mod prepare;

pub use completion::completion;
pub use describe::{describe, render as render_metadata};
pub use prepare::{prepare, PrepareCommand, PrepareOutcome, PrepareStatus};

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Prepare { args } => prepare::prepare(ctx, &args),
        Command::Describe { command, json } => describe::describe(ctx, &command, json),
        Command::Completion { shell } => completion::completion(shell),
    }
}
