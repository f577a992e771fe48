//! engine::metadata
//!
//! Command metadata and dynamic option resolution.
//!
//! # Design
//!
//! A command's metadata (inputs, options, help text) is not fully known
//! statically: a project's build runner may contribute options. The
//! resolver merges the command's static options with the runner's, static
//! first, runner options after in the order the runner returned them.
//!
//! # Invariants
//!
//! - Metadata is rebuilt on every resolution; nothing is cached, because
//!   runner availability depends on project state
//! - A failing runner query propagates; it never degrades to an empty set
//! - Returned metadata is not mutated afterwards

use serde::Serialize;

use crate::core::project::Project;
use crate::integration::{IntegrationError, RunnerProvider};

/// Value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Flag; `--name` / `--no-name`
    Boolean,
    /// Free-form text value
    String,
    /// Text value that must be numeric
    Number,
}

impl OptionType {
    /// Parse a config-file type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(OptionType::Boolean),
            "string" => Some(OptionType::String),
            "number" => Some(OptionType::Number),
            _ => None,
        }
    }
}

/// Who consumes an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionIntent {
    /// Consumed by this CLI (and its build step); never forwarded.
    App,
    /// Forwarded to the external native tool.
    Tool,
}

/// A parsed or default option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

impl OptionValue {
    /// The boolean value, if this is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Text(_) => None,
        }
    }

    /// The text value, if this is not a flag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Bool(_) => None,
            OptionValue::Text(s) => Some(s),
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A declared command option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOption {
    /// Name without leading dashes
    pub name: String,
    /// One-line help text
    pub summary: String,
    /// Value type
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Value used when the option is not given
    pub default: Option<OptionValue>,
    /// Who consumes the option
    pub intent: OptionIntent,
    /// Allowed values (empty = unrestricted)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl CommandOption {
    fn new(name: impl Into<String>, summary: impl Into<String>, kind: OptionType) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            kind,
            default: None,
            intent: OptionIntent::App,
            choices: Vec::new(),
        }
    }

    /// A boolean option consumed by this CLI.
    pub fn boolean(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self::new(name, summary, OptionType::Boolean)
    }

    /// A text option consumed by this CLI.
    pub fn string(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self::new(name, summary, OptionType::String)
    }

    /// A numeric option consumed by this CLI.
    pub fn number(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self::new(name, summary, OptionType::Number)
    }

    /// Set the default value.
    pub fn with_default(mut self, value: OptionValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the intent.
    pub fn with_intent(mut self, intent: OptionIntent) -> Self {
        self.intent = intent;
        self
    }

    /// Restrict values to `choices`.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }
}

/// A declared positional input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInput {
    pub name: String,
    pub summary: String,
    pub required: bool,
}

/// Where a command may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Runs anywhere.
    Global,
    /// Requires a project.
    Project,
}

/// Everything known about a command after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub summary: String,
    pub description: String,
    pub example_commands: Vec<String>,
    pub inputs: Vec<CommandInput>,
    pub options: Vec<CommandOption>,
}

impl CommandMetadata {
    /// Look up an option by name (first declaration wins).
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// Merge static options with runner-contributed options.
///
/// Static options come first; runner options follow in the order given.
pub fn merge_options(
    static_options: Vec<CommandOption>,
    runner_options: Option<Vec<CommandOption>>,
) -> Vec<CommandOption> {
    let mut options = static_options;
    if let Some(extra) = runner_options {
        for option in &extra {
            if options.iter().any(|o| o.name == option.name) {
                tracing::debug!(option = %option.name, "runner option shadowed by earlier declaration");
            }
        }
        options.extend(extra);
    }
    options
}

/// Resolve a command's full option list.
///
/// Queries the project's build runner, if there is a project and it has
/// one, and merges its options after `static_options`.
///
/// # Errors
///
/// Propagates failures from the runner lookup or the options query.
pub async fn resolve_options(
    static_options: Vec<CommandOption>,
    project: Option<&Project>,
    runners: &dyn RunnerProvider,
) -> Result<Vec<CommandOption>, IntegrationError> {
    let Some(project) = project else {
        return Ok(static_options);
    };

    let runner_options = match runners.build_runner(project).await? {
        Some(runner) => {
            let options = runner.options().await?;
            tracing::debug!(runner = runner.name(), count = options.len(), "runner contributed options");
            Some(options)
        }
        None => None,
    };

    Ok(merge_options(static_options, runner_options))
}
