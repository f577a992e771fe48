//! Caravel - a developer CLI for hybrid mobile projects
//!
//! Caravel prepares a web-based mobile project for native builds: it
//! builds web assets, makes sure the requested native platform is
//! installed, and delegates to Cordova.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Gate -> Resolve -> Evaluate -> Build -> Delegate lifecycle
//! - [`core`] - Validators, configuration, and project discovery
//! - [`integration`] - Collaborators: build runner, platforms, native tool
//! - [`ui`] - Output and prompts
//!
//! # Invariants
//!
//! 1. Commands gate on project capabilities before touching collaborators
//! 2. Metadata is resolved fresh for every invocation
//! 3. Options meant for caravel are never forwarded to the native tool
//! 4. Installing a missing platform requires confirmation

pub mod cli;
pub mod core;
pub mod engine;
pub mod integration;
pub mod ui;
