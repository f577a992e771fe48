//! prepare command - Copy web assets into native platforms
//!
//! # Lifecycle
//!
//! 1. Gate: project, enabled Cordova integration, `config.xml` in its root
//! 2. Resolve metadata (static options plus the build runner's) and
//!    validate arguments
//! 3. Evaluate the platform input: offer to install a missing platform;
//!    with no input and nothing installed, warn and stop
//! 4. Build web assets for the platform unless `--no-build`
//! 5. Run `cordova prepare` with the tool-bound arguments
//!
//! Warnings are printed and also returned in [`PrepareOutcome`].

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::core::project::{Project, CORDOVA};
use crate::engine::gate::{requirements, RequirementSet};
use crate::engine::lifecycle::{Lifecycle, LifecycleState};
use crate::engine::metadata::{
    resolve_options, CommandInput, CommandKind, CommandMetadata, CommandOption, OptionIntent,
    OptionValue,
};
use crate::engine::options::ParsedArgs;
use crate::engine::plan::{BuildDecision, BuildStatus, ExecutionPlan, BUILD_OPTION};
use crate::engine::runner::{run_command, RunError};
use crate::engine::scan::ProjectSnapshot;
use crate::engine::{Collaborators, Command, Context, FatalError};
use crate::integration::ToolOptions;
use crate::ui::output::{self, format_command, Verbosity};
use crate::ui::prompts::ConfirmPrompt;

const NAME: &str = "prepare";

/// Result of a prepare invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrepareOutcome {
    pub status: PrepareStatus,
    /// Warnings shown during the run
    pub warnings: Vec<String>,
}

/// How far a prepare invocation got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrepareStatus {
    /// No platform given and none installed; nothing ran.
    NothingToPrepare,
    /// The native tool ran.
    Prepared {
        build: BuildStatus,
        forwarded: Vec<String>,
    },
}

/// The `prepare` command.
#[derive(Debug)]
pub struct PrepareCommand {
    project: Option<Project>,
    collaborators: Collaborators,
    verbosity: Verbosity,
}

impl PrepareCommand {
    pub fn new(project: Option<Project>, collaborators: Collaborators, verbosity: Verbosity) -> Self {
        Self {
            project,
            collaborators,
            verbosity,
        }
    }

    /// Options `prepare` always has.
    pub fn static_options() -> Vec<CommandOption> {
        vec![
            CommandOption::boolean(BUILD_OPTION, "Do not invoke a web asset build")
                .with_default(OptionValue::Bool(true)),
            CommandOption::boolean("verbose", "Tell Cordova to print verbose output")
                .with_intent(OptionIntent::Tool),
            CommandOption::boolean("nosave", "Do not save platforms and plugins to config.xml")
                .with_intent(OptionIntent::Tool),
        ]
    }

    fn warn(&self, warnings: &mut Vec<String>, message: String) {
        output::warn(&message, self.verbosity);
        warnings.push(message);
    }
}

#[async_trait]
impl Command for PrepareCommand {
    const REQUIREMENTS: &'static RequirementSet = &requirements::PREPARE;
    type Output = PrepareOutcome;

    fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    async fn metadata(&self) -> Result<CommandMetadata, RunError> {
        let options = resolve_options(
            Self::static_options(),
            self.project.as_ref(),
            self.collaborators.runners.as_ref(),
        )
        .await?;

        let this = format_command("caravel prepare");
        Ok(CommandMetadata {
            name: NAME.to_string(),
            kind: CommandKind::Project,
            summary: "Copies assets to Cordova platforms, preparing them for native builds"
                .to_string(),
            description: format!(
                "{this} will do the following:\n\
                 \n\
                 - Build web assets with the project's build runner.\n\
                 - Copy the built web assets into your Cordova platforms.\n\
                 - Transform config.xml into platform-specific manifest files.\n\
                 - Copy icons and splash screens from resources/ into your Cordova platforms.\n\
                 - Copy plugin files into specified platforms.\n\
                 \n\
                 You may wish to use {this} if you run your project with Android Studio or Xcode."
            ),
            example_commands: vec![String::new(), "ios".to_string(), "android".to_string()],
            inputs: vec![CommandInput {
                name: "platform".to_string(),
                summary: format!(
                    "The platform you would like to prepare (e.g. {}, {})",
                    format_command("android"),
                    format_command("ios")
                ),
                required: false,
            }],
            options,
        })
    }

    async fn run(
        &self,
        snapshot: ProjectSnapshot,
        args: ParsedArgs,
        metadata: &CommandMetadata,
        lifecycle: &mut Lifecycle,
    ) -> Result<PrepareOutcome, RunError> {
        let this = format_command("caravel prepare");
        let project = self.project.as_ref().ok_or_else(|| {
            FatalError::new(format!("Cannot run {} outside a project directory.", this))
        })?;
        let root = snapshot
            .integration_root
            .ok_or_else(|| FatalError::new("The Cordova integration has no root directory."))?;

        let mut warnings = Vec::new();
        let installed = self.collaborators.platforms.platforms(&root).await?;

        match args.first_input() {
            Some(platform) if !installed.contains(platform) => {
                let prompt = ConfirmPrompt::new(
                    "confirm",
                    format!(
                        "Platform {} is not installed! Would you like to install it?",
                        format_command(platform)
                    ),
                );
                if self.collaborators.prompt.confirm(&prompt).await? {
                    tracing::info!(platform, "installing platform");
                    self.collaborators.platforms.install(platform, &root).await?;
                } else {
                    return Err(FatalError::new(format!(
                        "Can't prepare for {} unless the platform is installed.",
                        format_command(platform)
                    ))
                    .with_hint(format!("Did you mean just {}?", this))
                    .into());
                }
            }
            Some(_) => {}
            None if installed.is_empty() => {
                self.warn(
                    &mut warnings,
                    format!(
                        "No platforms installed. See {} to add Cordova platforms.",
                        format_command("cordova platform add --help")
                    ),
                );
                lifecycle.advance(LifecycleState::PlatformEvaluated)?;
                lifecycle.advance(LifecycleState::Done)?;
                return Ok(PrepareOutcome {
                    status: PrepareStatus::NothingToPrepare,
                    warnings,
                });
            }
            None => {}
        }
        lifecycle.advance(LifecycleState::PlatformEvaluated)?;

        let plan = ExecutionPlan::derive(metadata, &args, CORDOVA);
        let build = match plan.build {
            BuildDecision::Build(request) => {
                let platform = request.options.platform.clone().unwrap_or_default();
                tracing::info!(%platform, "building web assets");
                self.collaborators.builder.build(project, &request).await?;
                lifecycle.advance(LifecycleState::BuildExecuted)?;
                BuildStatus::Built { platform }
            }
            BuildDecision::SkipNoPlatform => {
                self.warn(
                    &mut warnings,
                    format!(
                        "Cannot perform a build without {platform}. Falling back to just {cordova}.\n\
                         Please supply a {platform} (e.g. {android}, {ios}) so caravel can build \
                         web assets. The {no_build} option can be specified to hide this warning.",
                        platform = format_command("platform"),
                        cordova = format_command("cordova prepare"),
                        android = format_command("android"),
                        ios = format_command("ios"),
                        no_build = format_command("--no-build"),
                    ),
                );
                lifecycle.advance(LifecycleState::BuildSkipped)?;
                BuildStatus::SkippedNoPlatform
            }
            BuildDecision::Suppressed => {
                lifecycle.advance(LifecycleState::BuildSkipped)?;
                BuildStatus::Suppressed
            }
        };

        self.collaborators
            .tool
            .run(&plan.tool_args, &ToolOptions { cwd: root })
            .await?;
        lifecycle.advance(LifecycleState::Delegated)?;

        Ok(PrepareOutcome {
            status: PrepareStatus::Prepared {
                build,
                forwarded: plan.tool_args,
            },
            warnings,
        })
    }
}

/// Build a `prepare` command for the working directory in `ctx`.
pub fn command_for(ctx: &Context) -> Result<PrepareCommand> {
    let cwd = match &ctx.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir()?,
    };
    let project = Project::discover(&cwd)?;
    let collaborators = Collaborators::cordova(ctx);
    Ok(PrepareCommand::new(
        project,
        collaborators,
        Verbosity::from_flags(ctx.quiet, ctx.debug),
    ))
}

/// Run `caravel prepare` with the raw arguments after the command name.
pub fn prepare(ctx: &Context, tokens: &[String]) -> Result<()> {
    let command = command_for(ctx)?;

    let rt = tokio::runtime::Runtime::new()?;
    let mut lifecycle = Lifecycle::new();
    let result = rt.block_on(run_command(&command, tokens, &mut lifecycle));
    tracing::debug!(trace = ?lifecycle.trace(), "prepare finished");

    let outcome = result?;
    if let PrepareStatus::Prepared { build, .. } = &outcome.status {
        tracing::info!(?build, warnings = outcome.warnings.len(), "prepared");
    }
    Ok(())
}
