//! describe command - Show a command's resolved metadata

use anyhow::{bail, Result};

use super::prepare;
use crate::engine::metadata::{CommandMetadata, OptionIntent, OptionType};
use crate::engine::{Command, Context};
use crate::ui::output::{self, Verbosity};

/// Print the metadata of `command`, including runner-contributed options.
pub fn describe(ctx: &Context, command: &str, json: bool) -> Result<()> {
    let metadata = match command {
        "prepare" => {
            let prepare = prepare::command_for(ctx)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(prepare.metadata())?
        }
        other => bail!("unknown command '{}'", other),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        output::print(render(&metadata), Verbosity::from_flags(ctx.quiet, ctx.debug));
    }
    Ok(())
}

/// Human-readable rendering of command metadata.
pub fn render(metadata: &CommandMetadata) -> String {
    let mut out = format!("caravel {} - {}\n", metadata.name, metadata.summary);

    if !metadata.description.is_empty() {
        out.push('\n');
        out.push_str(metadata.description.trim());
        out.push('\n');
    }

    if !metadata.inputs.is_empty() {
        out.push_str("\nInputs:\n");
        for input in &metadata.inputs {
            let required = if input.required { " (required)" } else { "" };
            out.push_str(&format!("  {}{}  {}\n", input.name, required, input.summary));
        }
    }

    if !metadata.options.is_empty() {
        out.push_str("\nOptions:\n");
        for option in &metadata.options {
            let flag = match option.kind {
                OptionType::Boolean => format!("--{}", option.name),
                OptionType::String | OptionType::Number => format!("--{} <value>", option.name),
            };
            let mut notes = Vec::new();
            if let Some(default) = &option.default {
                notes.push(format!("default: {}", default));
            }
            if !option.choices.is_empty() {
                notes.push(format!("one of: {}", option.choices.join(", ")));
            }
            if option.intent == OptionIntent::Tool {
                notes.push("passed to cordova".to_string());
            }
            let notes = if notes.is_empty() {
                String::new()
            } else {
                format!(" [{}]", notes.join("; "))
            };
            out.push_str(&format!("  {}  {}{}\n", flag, option.summary, notes));
        }
    }

    if !metadata.example_commands.is_empty() {
        out.push_str("\nExamples:\n");
        for example in &metadata.example_commands {
            let line = format!("caravel {} {}", metadata.name, example);
            out.push_str(&format!("  {}\n", line.trim_end()));
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::metadata::{CommandInput, CommandKind, CommandOption, OptionValue};

    #[test]
    fn render_lists_inputs_options_and_examples() {
        let metadata = CommandMetadata {
            name: "prepare".into(),
            kind: CommandKind::Project,
            summary: "Copies assets".into(),
            description: String::new(),
            example_commands: vec![String::new(), "ios".into()],
            inputs: vec![CommandInput {
                name: "platform".into(),
                summary: "Target platform".into(),
                required: false,
            }],
            options: vec![
                CommandOption::boolean("build", "Do not build").with_default(OptionValue::Bool(true)),
                CommandOption::boolean("verbose", "Verbose").with_intent(OptionIntent::Tool),
                CommandOption::string("env", "Environment").with_choices(["dev", "prod"]),
            ],
        };

        let text = render(&metadata);
        assert!(text.starts_with("caravel prepare - Copies assets"));
        assert!(text.contains("  platform  Target platform"));
        assert!(text.contains("--build  Do not build [default: true]"));
        assert!(text.contains("--verbose  Verbose [passed to cordova]"));
        assert!(text.contains("--env <value>  Environment [one of: dev, prod]"));
        assert!(text.contains("  caravel prepare\n  caravel prepare ios"));
    }
}
