//! engine::plan
//!
//! Execution plan derivation.
//!
//! # Architecture
//!
//! After platform evaluation the controller needs two decisions: whether
//! to build web assets first (and for which platform), and what to hand
//! the native tool. Both are derived here from resolved metadata and
//! collected arguments.
//!
//! # Invariants
//!
//! - Derivation does not perform I/O
//! - The same metadata and arguments always produce the same plan
//!
//! # Example
//!
//! ```
//! use caravel::engine::metadata::{CommandKind, CommandMetadata, CommandOption, OptionValue};
//! use caravel::engine::options::parse_args;
//! use caravel::engine::plan::{BuildDecision, ExecutionPlan};
//!
//! let metadata = CommandMetadata {
//!     name: "prepare".into(),
//!     kind: CommandKind::Project,
//!     summary: String::new(),
//!     description: String::new(),
//!     example_commands: vec![],
//!     inputs: vec![],
//!     options: vec![CommandOption::boolean("build", "").with_default(OptionValue::Bool(true))],
//! };
//! let args = parse_args(&metadata, &["--no-build".to_string()]).unwrap();
//! let plan = ExecutionPlan::derive(&metadata, &args, "cordova");
//!
//! assert_eq!(plan.build, BuildDecision::Suppressed);
//! assert_eq!(plan.tool_args, vec!["prepare"]);
//! ```

use serde::Serialize;

use super::metadata::CommandMetadata;
use super::options::{filter_arguments_for_tool, generate_build_options, ParsedArgs};
use crate::integration::BuildRequest;

/// Name of the option that turns the build step on or off.
pub const BUILD_OPTION: &str = "build";

/// Whether to build before delegating.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildDecision {
    /// Build with this request.
    Build(BuildRequest),
    /// Build wanted but no platform could be determined.
    SkipNoPlatform,
    /// Build turned off by the user.
    Suppressed,
}

/// What happened to the build, as reported in a command's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildStatus {
    /// Web assets were built for `platform`.
    Built { platform: String },
    /// Skipped with a warning: no platform.
    SkippedNoPlatform,
    /// Skipped silently: `--no-build`.
    Suppressed,
}

/// Per-invocation plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    /// Build step decision
    pub build: BuildDecision,
    /// Arguments for the external tool
    pub tool_args: Vec<String>,
}

impl ExecutionPlan {
    /// Derive the plan for `args` under `metadata`.
    ///
    /// The build runs unless the `build` flag is false. An absent flag
    /// counts as set.
    pub fn derive(metadata: &CommandMetadata, args: &ParsedArgs, engine: &str) -> Self {
        let wants_build = args.options.get_bool(BUILD_OPTION).unwrap_or(true);

        let build = if !wants_build {
            BuildDecision::Suppressed
        } else {
            let options = generate_build_options(metadata, &args.inputs, &args.options, engine);
            if options.platform.is_some() {
                BuildDecision::Build(BuildRequest {
                    inputs: args.inputs.clone(),
                    options,
                })
            } else {
                BuildDecision::SkipNoPlatform
            }
        };

        Self {
            build,
            tool_args: filter_arguments_for_tool(metadata, args),
        }
    }
}
