//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--confirm`: Accept confirmation prompts without asking
//! - `--quiet` / `-q`: Minimal output
//!
//! `prepare` takes its own arguments raw: its options depend on the
//! project's build runner, so they are parsed by the engine against the
//! resolved metadata rather than by clap. Global flags that appear among
//! those arguments (before any `--`) are still applied as global flags.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Caravel - prepare hybrid mobile projects for native builds
#[derive(Parser, Debug)]
#[command(name = "caravel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if caravel was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, global = true)]
    pub confirm: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Exits with clap's usage error if a global flag after `prepare` is
    /// malformed.
    pub fn parse_args() -> Self {
        let mut cli: Self = Parser::parse();
        if let Err(e) = cli.hoist_global_flags() {
            e.exit();
        }
        cli
    }

    /// Move global flags out of `prepare`'s raw arguments.
    ///
    /// Tokens after `--` belong to the native tool and are left alone.
    /// Global flags take precedence over runner options of the same name.
    pub fn hoist_global_flags(&mut self) -> Result<(), clap::Error> {
        let Command::Prepare { args } = &mut self.command else {
            return Ok(());
        };

        let mut kept = Vec::with_capacity(args.len());
        let mut tokens = std::mem::take(args).into_iter();
        while let Some(token) = tokens.next() {
            match token.as_str() {
                "--" => {
                    kept.push(token);
                    kept.extend(tokens.by_ref());
                }
                "--debug" => self.debug = true,
                "-q" | "--quiet" => self.quiet = true,
                "--confirm" => self.confirm = true,
                "--interactive" => self.interactive_flag = true,
                "--no-interactive" => self.no_interactive = true,
                "--cwd" => match tokens.next() {
                    Some(dir) => self.cwd = Some(PathBuf::from(dir)),
                    None => {
                        return Err(clap::Error::raw(
                            ErrorKind::InvalidValue,
                            "a value is required for '--cwd <CWD>' but none was supplied\n",
                        ))
                    }
                },
                _ => match token.strip_prefix("--cwd=") {
                    Some(dir) => self.cwd = Some(PathBuf::from(dir)),
                    None => kept.push(token),
                },
            }
        }

        *args = kept;
        Ok(())
    }

    /// Determine if interactive mode is enabled.
    ///
    /// `--interactive` wins; otherwise `--no-interactive` or `--quiet`
    /// disable prompts; otherwise the config default applies when stdin
    /// is a terminal.
    pub fn interactive(&self, config_default: bool) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            config_default && std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy web assets to Cordova platforms, preparing them for native builds
    #[command(
        name = "prepare",
        long_about = "Copy web assets to Cordova platforms, preparing them for native builds.\n\n\
            Builds web assets with the project's build runner (unless --no-build), then \
            runs `cordova prepare`. If the requested platform is not installed you are \
            offered to install it.\n\n\
            Options contributed by the build runner are accepted as well; run \
            `caravel describe prepare` to list them. Arguments after `--` are passed \
            to cordova unchanged.",
        after_help = "\
EXAMPLES:
    caravel prepare
    caravel prepare ios
    caravel prepare android --no-build
    caravel prepare android -- --gradleArg=-q"
    )]
    Prepare {
        /// Platform, options, and `--` pass-through arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Show a command's inputs and options, including runner-contributed ones
    Describe {
        /// Command to describe
        command: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    caravel completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    caravel completion zsh >> ~/.zshrc

    # Fish
    caravel completion fish > ~/.config/fish/completions/caravel.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
