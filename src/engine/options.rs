//! engine::options
//!
//! Argument collection against resolved metadata, and the filters that
//! derive build options and native tool arguments from it.
//!
//! # Parsing
//!
//! Tokens after the command name are matched against the metadata:
//!
//! - positional tokens fill declared inputs in order
//! - `--name`, `--name=value`, `--name value`; `--no-name` clears a flag
//! - a bare `--` ends option parsing; the rest passes through to the tool
//!
//! Defaults are applied for absent options, then every value is checked
//! with the validators from [`crate::core::validators`]. All violations are
//! reported together.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::metadata::{CommandMetadata, CommandOption, OptionIntent, OptionType, OptionValue};
use crate::core::validators::{contains, numeric, required, Validator};

/// Errors from argument collection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '--{0}' requires a value")]
    MissingValue(String),

    #[error("option '--{0}' does not take the value '{1}'")]
    UnexpectedValue(String, String),

    #[error("unexpected argument '{0}'")]
    UnexpectedInput(String),

    #[error("{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Option values keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandLineOptions {
    values: BTreeMap<String, OptionValue>,
}

impl CommandLineOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.set(name, value);
        self
    }

    /// Get a value.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Get a flag value.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    /// Get a text value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    /// Iterate values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Arguments collected for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Positional inputs, in declaration order
    pub inputs: Vec<String>,
    /// Options with defaults applied
    pub options: CommandLineOptions,
    /// Tokens after `--`, forwarded to the external tool untouched
    pub passthrough: Vec<String>,
}

impl ParsedArgs {
    /// The first positional input, if given.
    pub fn first_input(&self) -> Option<&str> {
        self.inputs.first().map(String::as_str)
    }
}

/// Options handed to the build step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
    /// Target platform, if one could be determined
    pub platform: Option<String>,
    /// Integration the build is for
    pub engine: String,
    /// Non-tool option values
    pub options: BTreeMap<String, OptionValue>,
}

/// Parse and validate raw tokens against `metadata`.
///
/// # Errors
///
/// Returns a syntax error for unknown options, missing values or surplus
/// inputs, or [`ArgsError::Invalid`] listing every validation message.
pub fn parse_args(metadata: &CommandMetadata, tokens: &[String]) -> Result<ParsedArgs, ArgsError> {
    let mut args = ParsedArgs::default();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if token == "--" {
            args.passthrough = iter.by_ref().cloned().collect();
            break;
        }

        if let Some(body) = token.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            if let Some(option) = metadata.option(name) {
                let value = match option.kind {
                    OptionType::Boolean => match inline {
                        None => OptionValue::Bool(true),
                        Some(v) => OptionValue::Bool(parse_flag(name, v)?),
                    },
                    OptionType::String | OptionType::Number => {
                        let value = match inline {
                            Some(v) => v.to_string(),
                            None => iter
                                .next()
                                .cloned()
                                .ok_or_else(|| ArgsError::MissingValue(name.to_string()))?,
                        };
                        OptionValue::Text(value)
                    }
                };
                args.options.set(name, value);
                continue;
            }

            if let Some(negated) = name.strip_prefix("no-") {
                if let Some(option) = metadata.option(negated) {
                    if option.kind == OptionType::Boolean && inline.is_none() {
                        args.options.set(negated, OptionValue::Bool(false));
                        continue;
                    }
                }
            }

            return Err(ArgsError::UnknownOption(token.clone()));
        }

        if token.len() > 1 && token.starts_with('-') {
            return Err(ArgsError::UnknownOption(token.clone()));
        }

        if args.inputs.len() >= metadata.inputs.len() {
            return Err(ArgsError::UnexpectedInput(token.clone()));
        }
        args.inputs.push(token.clone());
    }

    for option in &metadata.options {
        if args.options.get(&option.name).is_none() {
            if let Some(default) = &option.default {
                args.options.set(option.name.clone(), default.clone());
            }
        }
    }

    let messages = validate_args(metadata, &args);
    if !messages.is_empty() {
        return Err(ArgsError::Invalid(messages));
    }

    Ok(args)
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ArgsError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ArgsError::UnexpectedValue(name.to_string(), value.to_string())),
    }
}

/// Check collected arguments against the metadata's rules.
///
/// Returns one message per violation, in declaration order.
pub fn validate_args(metadata: &CommandMetadata, args: &ParsedArgs) -> Vec<String> {
    let mut messages = Vec::new();

    for (index, input) in metadata.inputs.iter().enumerate() {
        if input.required {
            let value = args.inputs.get(index).map(String::as_str).unwrap_or("");
            if let Some(message) = required(value, Some(&input.name)).message() {
                messages.push(message.to_string());
            }
        }
    }

    for option in &metadata.options {
        let Some(value) = args.options.get_str(&option.name) else {
            continue;
        };
        if let Some(message) = check_option(option, value) {
            messages.push(message);
        }
    }

    messages
}

fn check_option(option: &CommandOption, value: &str) -> Option<String> {
    let label = Some(option.name.as_str());
    if option.kind == OptionType::Number {
        if let Some(message) = numeric(value, label).message() {
            return Some(message.to_string());
        }
    }
    if !option.choices.is_empty() {
        let allowed = contains(option.choices.iter().cloned());
        if let Some(message) = allowed.validate(value, label).message() {
            return Some(message.to_string());
        }
    }
    None
}

/// Derive the options passed to the build step.
///
/// The platform is the `platform` option if set, else the first input.
/// Every non-tool option from the metadata that has a value is carried.
pub fn generate_build_options(
    metadata: &CommandMetadata,
    inputs: &[String],
    options: &CommandLineOptions,
    engine: &str,
) -> BuildOptions {
    let platform = options
        .get_str("platform")
        .map(String::from)
        .or_else(|| inputs.first().cloned());

    let values = metadata
        .options
        .iter()
        .filter(|o| o.intent != OptionIntent::Tool)
        .filter_map(|o| options.get(&o.name).map(|v| (o.name.clone(), v.clone())))
        .collect();

    BuildOptions {
        platform,
        engine: engine.to_string(),
        options: values,
    }
}

/// Derive the argument list for the external tool.
///
/// `[command, inputs..., tool options..., -- passthrough...]`. Only
/// options with [`OptionIntent::Tool`] are rendered: set flags as
/// `--name`, text as `--name value`; cleared flags are omitted.
pub fn filter_arguments_for_tool(metadata: &CommandMetadata, args: &ParsedArgs) -> Vec<String> {
    let mut out = vec![metadata.name.clone()];
    out.extend(args.inputs.iter().cloned());

    for option in metadata
        .options
        .iter()
        .filter(|o| o.intent == OptionIntent::Tool)
    {
        match args.options.get(&option.name) {
            Some(OptionValue::Bool(true)) => out.push(format!("--{}", option.name)),
            Some(OptionValue::Text(value)) => {
                out.push(format!("--{}", option.name));
                out.push(value.clone());
            }
            Some(OptionValue::Bool(false)) | None => {}
        }
    }

    if !args.passthrough.is_empty() {
        out.push("--".to_string());
        out.extend(args.passthrough.iter().cloned());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::metadata::{CommandInput, CommandKind};

    fn metadata() -> CommandMetadata {
        CommandMetadata {
            name: "prepare".into(),
            kind: CommandKind::Project,
            summary: String::new(),
            description: String::new(),
            example_commands: vec![],
            inputs: vec![CommandInput {
                name: "platform".into(),
                summary: String::new(),
                required: false,
            }],
            options: vec![
                CommandOption::boolean("build", "").with_default(OptionValue::Bool(true)),
                CommandOption::boolean("verbose", "").with_intent(OptionIntent::Tool),
                CommandOption::string("target", "").with_intent(OptionIntent::Tool),
                CommandOption::number("port", ""),
                CommandOption::string("env", "").with_choices(["dev", "prod"]),
            ],
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_inputs_and_defaults() {
        let args = parse_args(&metadata(), &tokens(&["ios"])).unwrap();
        assert_eq!(args.inputs, vec!["ios"]);
        assert_eq!(args.options.get_bool("build"), Some(true));
        assert_eq!(args.options.get("verbose"), None);
    }

    #[test]
    fn negated_flag_clears_default() {
        let args = parse_args(&metadata(), &tokens(&["--no-build"])).unwrap();
        assert_eq!(args.options.get_bool("build"), Some(false));
    }

    #[test]
    fn flag_with_explicit_value() {
        let args = parse_args(&metadata(), &tokens(&["--build=false"])).unwrap();
        assert_eq!(args.options.get_bool("build"), Some(false));

        let err = parse_args(&metadata(), &tokens(&["--build=maybe"])).unwrap_err();
        assert_eq!(
            err,
            ArgsError::UnexpectedValue("build".into(), "maybe".into())
        );
    }

    #[test]
    fn text_values_inline_or_next() {
        let args =
            parse_args(&metadata(), &tokens(&["--target=emulator", "--port", "8100"])).unwrap();
        assert_eq!(args.options.get_str("target"), Some("emulator"));
        assert_eq!(args.options.get_str("port"), Some("8100"));
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = parse_args(&metadata(), &tokens(&["--target"])).unwrap_err();
        assert_eq!(err, ArgsError::MissingValue("target".into()));
    }

    #[test]
    fn unknown_options_rejected() {
        assert_eq!(
            parse_args(&metadata(), &tokens(&["--bogus"])).unwrap_err(),
            ArgsError::UnknownOption("--bogus".into())
        );
        assert_eq!(
            parse_args(&metadata(), &tokens(&["-x"])).unwrap_err(),
            ArgsError::UnknownOption("-x".into())
        );
        // Only flags can be negated.
        assert_eq!(
            parse_args(&metadata(), &tokens(&["--no-target"])).unwrap_err(),
            ArgsError::UnknownOption("--no-target".into())
        );
    }

    #[test]
    fn surplus_inputs_rejected() {
        let err = parse_args(&metadata(), &tokens(&["ios", "android"])).unwrap_err();
        assert_eq!(err, ArgsError::UnexpectedInput("android".into()));
    }

    #[test]
    fn passthrough_after_separator() {
        let args = parse_args(&metadata(), &tokens(&["android", "--", "--gradleArg=-q", "x"])).unwrap();
        assert_eq!(args.inputs, vec!["android"]);
        assert_eq!(args.passthrough, vec!["--gradleArg=-q", "x"]);
    }

    #[test]
    fn validation_messages_collected() {
        let err =
            parse_args(&metadata(), &tokens(&["--port", "abc", "--env", "staging"])).unwrap_err();
        let ArgsError::Invalid(messages) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("must be numeric"));
        assert!(messages[1].contains("must be one of"));
    }

    #[test]
    fn required_inputs_checked() {
        let mut md = metadata();
        md.inputs[0].required = true;
        let err = parse_args(&md, &[]).unwrap_err();
        assert_eq!(
            err,
            ArgsError::Invalid(vec!["platform must not be empty.".into()])
        );
    }

    #[test]
    fn build_options_take_platform_from_input() {
        let md = metadata();
        let args = parse_args(&md, &tokens(&["android", "--verbose", "--port", "80"])).unwrap();
        let build = generate_build_options(&md, &args.inputs, &args.options, "cordova");

        assert_eq!(build.platform.as_deref(), Some("android"));
        assert_eq!(build.engine, "cordova");
        assert_eq!(build.options.get("port"), Some(&OptionValue::Text("80".into())));
        assert_eq!(build.options.get("build"), Some(&OptionValue::Bool(true)));
        assert!(!build.options.contains_key("verbose"));
    }

    #[test]
    fn build_options_prefer_platform_option() {
        let md = metadata();
        let options = CommandLineOptions::new().with("platform", OptionValue::Text("ios".into()));
        let build = generate_build_options(&md, &tokens(&["android"]), &options, "cordova");
        assert_eq!(build.platform.as_deref(), Some("ios"));
    }

    #[test]
    fn build_options_without_platform() {
        let md = metadata();
        let build = generate_build_options(&md, &[], &CommandLineOptions::new(), "cordova");
        assert_eq!(build.platform, None);
    }

    #[test]
    fn tool_arguments_exclude_app_options() {
        let md = metadata();
        let args = parse_args(
            &md,
            &tokens(&["ios", "--no-build", "--verbose", "--target", "device", "--port", "1"]),
        )
        .unwrap();

        assert_eq!(
            filter_arguments_for_tool(&md, &args),
            vec!["prepare", "ios", "--verbose", "--target", "device"]
        );
    }

    #[test]
    fn tool_arguments_keep_passthrough() {
        let md = metadata();
        let args = parse_args(&md, &tokens(&["--", "--release"])).unwrap();
        assert_eq!(
            filter_arguments_for_tool(&md, &args),
            vec!["prepare", "--", "--release"]
        );
    }
}
