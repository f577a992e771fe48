//! integration::script
//!
//! Build runner and builder driven by the project's `[build]` table.
//!
//! # Design
//!
//! The runner exists only while `caravel.toml` has a `[build]` section.
//! The config is re-read from disk on every lookup, so adding or removing
//! the section takes effect on the next invocation without any cache to
//! invalidate.
//!
//! The builder runs `[build].command` in the project root. Only options
//! declared in `[[build.options]]` are rendered onto the command line,
//! followed by `--platform <p>` and `--engine <engine>`.

use std::path::PathBuf;

use async_trait::async_trait;

use super::cordova::run_process;
use super::traits::{BuildRequest, Builder, IntegrationError, Runner, RunnerProvider};
use crate::core::config::{BuildConfig, BuildOptionConfig, DefaultValue};
use crate::core::project::Project;
use crate::engine::metadata::{CommandOption, OptionIntent, OptionType, OptionValue};

/// Command used when `[build].command` is empty.
pub const DEFAULT_BUILD_COMMAND: &[&str] = &["npm", "run", "build", "--"];

/// Looks up the `[build]` runner of a project.
#[derive(Debug, Clone, Default)]
pub struct ConfigRunnerProvider;

impl ConfigRunnerProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RunnerProvider for ConfigRunnerProvider {
    async fn build_runner(
        &self,
        project: &Project,
    ) -> Result<Option<Box<dyn Runner>>, IntegrationError> {
        let config = project
            .reload_config()
            .map_err(|e| IntegrationError::Config(e.to_string()))?;

        Ok(config.build.map(|build| {
            tracing::debug!(root = %project.root().display(), "project has a build runner");
            Box::new(ScriptRunner::new(build)) as Box<dyn Runner>
        }))
    }
}

/// The runner described by a `[build]` table.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    build: BuildConfig,
}

impl ScriptRunner {
    pub fn new(build: BuildConfig) -> Self {
        Self { build }
    }
}

#[async_trait]
impl Runner for ScriptRunner {
    fn name(&self) -> &str {
        "script"
    }

    async fn options(&self) -> Result<Vec<CommandOption>, IntegrationError> {
        self.build.options.iter().map(to_command_option).collect()
    }
}

/// Convert a declared build option into a command option.
fn to_command_option(config: &BuildOptionConfig) -> Result<CommandOption, IntegrationError> {
    let kind = OptionType::from_name(&config.kind).ok_or_else(|| {
        IntegrationError::Runner(format!(
            "option '{}' has unknown type '{}'",
            config.name, config.kind
        ))
    })?;

    let default = config.default.as_ref().map(|value| match value {
        DefaultValue::Bool(b) => OptionValue::Bool(*b),
        other => OptionValue::Text(other.to_string()),
    });

    Ok(CommandOption {
        name: config.name.clone(),
        summary: config.summary.clone(),
        kind,
        default,
        intent: OptionIntent::App,
        choices: config.choices.clone(),
    })
}

/// Runs the project's `[build].command`.
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder;

impl ScriptBuilder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Builder for ScriptBuilder {
    async fn build(&self, project: &Project, request: &BuildRequest) -> Result<(), IntegrationError> {
        let build = project
            .reload_config()
            .map_err(|e| IntegrationError::Config(e.to_string()))?
            .build
            .unwrap_or_default();

        let (program, args) = build_command(&build, request);
        let cwd: PathBuf = project.root().to_path_buf();
        run_process(&program, &args, &cwd).await
    }
}

/// Split the configured command into program and arguments, with the
/// request rendered after it.
pub fn build_command(build: &BuildConfig, request: &BuildRequest) -> (String, Vec<String>) {
    let mut command: Vec<String> = if build.command.is_empty() {
        DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect()
    } else {
        build.command.clone()
    };
    let program = command.remove(0);
    let mut args = command;

    for declared in &build.options {
        match request.options.options.get(&declared.name) {
            Some(OptionValue::Bool(true)) => args.push(format!("--{}", declared.name)),
            Some(OptionValue::Text(value)) => {
                args.push(format!("--{}", declared.name));
                args.push(value.clone());
            }
            Some(OptionValue::Bool(false)) | None => {}
        }
    }

    if let Some(platform) = &request.options.platform {
        args.push("--platform".to_string());
        args.push(platform.clone());
    }
    args.push("--engine".to_string());
    args.push(request.options.engine.clone());

    (program, args)
}
