//! cli
//!
//! Command-line interface layer for Caravel.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that drive the [`crate::engine`] lifecycle.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::engine;
use crate::ui::output;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.debug);
    output::set_color(std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none());

    let config = Config::load()?;

    // CLI flags take precedence over the config default.
    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(config.interactive()),
        assume_yes: cli.confirm,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("caravel=debug")
    } else {
        EnvFilter::new("caravel=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
