//! Property-based tests for validators and argument handling.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use caravel::core::validators::{
    combine, contains, email, numeric, required, BoxedValidator, Validation, Validator,
};
use caravel::engine::metadata::{CommandInput, CommandKind, CommandMetadata, CommandOption};
use caravel::engine::options::{filter_arguments_for_tool, parse_args};
use caravel::engine::OptionIntent;

/// Strategy for option names: lowercase, never starting with "no-".
fn option_name() -> impl Strategy<Value = String> {
    "[a-mo-z][a-z]{1,8}"
}

/// Strategy for platform-like input tokens.
fn input_token() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}"
}

fn metadata(app: &[String], tool: &[String]) -> CommandMetadata {
    let mut options: Vec<CommandOption> = app
        .iter()
        .map(|name| CommandOption::boolean(name.clone(), ""))
        .collect();
    options.extend(
        tool.iter()
            .map(|name| CommandOption::boolean(name.clone(), "").with_intent(OptionIntent::Tool)),
    );
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
        options,
    }
}

proptest! {
    #[test]
    fn required_accepts_any_non_empty_input(input in ".+") {
        prop_assert_eq!(required(&input, None), Validation::Valid);
        prop_assert_eq!(required(&input, Some("name")), Validation::Valid);
    }

    #[test]
    fn numeric_accepts_formatted_integers(n in any::<i64>()) {
        prop_assert!(numeric(&n.to_string(), None).is_valid());
    }

    #[test]
    fn numeric_accepts_finite_floats(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(numeric(&f.to_string(), None).is_valid());
        let padded = format!("  {}\t", f);
        prop_assert!(numeric(&padded, None).is_valid());
    }

    #[test]
    fn numeric_rejects_letters_only(input in "[a-hj-mo-z]{1,12}") {
        // Excludes i and n so "inf" and "nan" cannot be generated.
        prop_assert!(!numeric(&input, None).is_valid());
    }

    #[test]
    fn contains_accepts_every_listed_value(
        values in prop::collection::vec("[a-z]{1,8}", 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let chosen = pick.get(&values).clone();
        let validator = contains(values.clone());
        prop_assert_eq!(validator.validate(&chosen, Some("platform")), Validation::Valid);
    }

    #[test]
    fn contains_lists_choices_on_rejection(
        values in prop::collection::vec("[a-z]{1,8}", 1..6),
    ) {
        let validator = contains(values.clone());
        let result = validator.validate("NOT-LISTED", Some("platform"));
        let message = result.message().unwrap_or_default().to_string();
        prop_assert!(message.starts_with("platform must be one of: ("));
        for value in &values {
            prop_assert!(message.contains(value.as_str()));
        }
    }

    #[test]
    fn combine_agrees_with_each_member(input in "\\PC{0,16}") {
        let both = combine(vec![
            Box::new(required) as BoxedValidator,
            Box::new(numeric),
        ]);
        let expected = if !required(&input, Some("port")).is_valid() {
            required(&input, Some("port"))
        } else {
            numeric(&input, Some("port"))
        };
        prop_assert_eq!(both.validate(&input, Some("port")), expected);
    }

    #[test]
    fn validators_never_panic(input in "\\PC*") {
        let _ = required(&input, None);
        let _ = email(&input, Some("email"));
        let _ = numeric(&input, None);
        let _ = contains(["ios", "android"]).validate(&input, None);
    }

    #[test]
    fn app_options_never_reach_the_tool(
        app in prop::collection::btree_set(option_name(), 0..4),
        tool in prop::collection::btree_set(option_name(), 0..4),
        platform in prop::option::of(input_token()),
        passthrough in prop::collection::vec("[a-z=-]{1,10}", 0..3),
    ) {
        let app: Vec<String> = app.into_iter().collect();
        let tool: Vec<String> = tool.into_iter().filter(|t| !app.contains(t)).collect();
        let metadata = metadata(&app, &tool);

        let mut tokens: Vec<String> = platform.iter().cloned().collect();
        tokens.extend(app.iter().map(|name| format!("--{}", name)));
        tokens.extend(tool.iter().map(|name| format!("--{}", name)));
        if !passthrough.is_empty() {
            tokens.push("--".into());
            tokens.extend(passthrough.iter().cloned());
        }

        let parsed = parse_args(&metadata, &tokens).unwrap();
        let forwarded = filter_arguments_for_tool(&metadata, &parsed);

        let split = forwarded.iter().position(|t| t == "--").unwrap_or(forwarded.len());
        for name in &app {
            let flag = format!("--{}", name);
            prop_assert!(!forwarded[..split].contains(&flag));
        }
        for name in &tool {
            let flag = format!("--{}", name);
            prop_assert!(forwarded[..split].contains(&flag));
        }
        prop_assert_eq!(&forwarded[0], "prepare");
        let tail: Vec<String> = forwarded.iter().skip(split + 1).cloned().collect();
        prop_assert_eq!(tail, passthrough);
    }
}
