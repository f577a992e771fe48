//! core::validators
//!
//! Composable validation rules for single input strings.
//!
//! # Design
//!
//! A validator checks one input against one rule and returns a
//! [`Validation`]: either `Valid` or `Invalid` with a user-facing message.
//! Validation failures are data, not errors; callers decide how to surface
//! them. When a field label is supplied it is embedded (emphasized) in the
//! message.
//!
//! Plain functions with the right signature are validators, so the
//! primitives below can be passed around directly and composed with
//! [`combine`].
//!
//! # Example
//!
//! ```
//! use caravel::core::validators::{combine, numeric, required, Validation, Validator};
//!
//! let port = combine(vec![Box::new(required), Box::new(numeric)]);
//!
//! assert_eq!(port.validate("8100", Some("port")), Validation::Valid);
//! assert!(!port.validate("", Some("port")).is_valid());
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::ui::output::emphasize;

/// Outcome of running a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The input satisfies the rule.
    Valid,
    /// The input violates the rule; the message describes how.
    Invalid(String),
}

impl Validation {
    /// Check if the input was valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// The violation message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(message) => Some(message),
        }
    }

    /// Convert into a `Result`, with the message as the error.
    pub fn into_result(self) -> Result<(), String> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(message) => Err(message),
        }
    }
}

/// A rule that checks a single input string.
///
/// Implemented for every `Fn(&str, Option<&str>) -> Validation`, so plain
/// functions and closures are validators. Implementations must be pure.
pub trait Validator: Send + Sync {
    /// Check `input`, embedding `label` in the message when given.
    fn validate(&self, input: &str, label: Option<&str>) -> Validation;
}

impl<F> Validator for F
where
    F: Fn(&str, Option<&str>) -> Validation + Send + Sync,
{
    fn validate(&self, input: &str, label: Option<&str>) -> Validation {
        self(input, label)
    }
}

/// Owned, type-erased validator.
pub type BoxedValidator = Box<dyn Validator>;

/// Build an `Invalid` result, with or without a leading label.
///
/// `labeled` follows the emphasized label; `bare` is used on its own.
fn invalid(label: Option<&str>, labeled: &str, bare: &str) -> Validation {
    match label {
        Some(label) => Validation::Invalid(format!("{} {}", emphasize(label), labeled)),
        None => Validation::Invalid(bare.to_string()),
    }
}

/// Input must not be empty.
pub fn required(input: &str, label: Option<&str>) -> Validation {
    if input.is_empty() {
        return invalid(label, "must not be empty.", "Must not be empty.");
    }
    Validation::Valid
}

/// Input must be a well-formed email address.
pub fn email(input: &str, label: Option<&str>) -> Validation {
    if !is_valid_email(input) {
        return invalid(
            label,
            "is an invalid email address.",
            "Invalid email address.",
        );
    }
    Validation::Valid
}

/// Input must be a finite number.
///
/// Leading and trailing whitespace is ignored. Empty and whitespace-only
/// input, `NaN`, and infinities (including overflowing literals) are
/// rejected.
pub fn numeric(input: &str, label: Option<&str>) -> Validation {
    if !is_numeric(input) {
        return invalid(label, "must be numeric.", "Must be numeric.");
    }
    Validation::Valid
}

/// Input must be exactly one of `values` (case-sensitive).
///
/// An empty value list rejects everything.
pub fn contains<I, S>(values: I) -> impl Validator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();

    move |input: &str, label: Option<&str>| {
        if values.iter().any(|v| v == input) {
            return Validation::Valid;
        }

        let listed = values
            .iter()
            .map(|v| emphasize(v))
            .collect::<Vec<_>>()
            .join(", ");
        match label {
            Some(label) => Validation::Invalid(format!(
                "{} must be one of: ({})",
                emphasize(label),
                listed
            )),
            None => Validation::Invalid(format!("Must be one of: ({})", listed)),
        }
    }
}

/// Compose validators with short-circuit AND semantics.
///
/// Runs each validator against the same input and label in order and
/// returns the first `Invalid` result. Returns `Valid` only if every
/// validator passes.
pub fn combine(validators: Vec<BoxedValidator>) -> impl Validator {
    move |input: &str, label: Option<&str>| {
        for validator in &validators {
            let result = validator.validate(input, label);
            if !result.is_valid() {
                return result;
            }
        }
        Validation::Valid
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
        )
        .expect("email pattern is valid")
    })
}

fn is_valid_email(input: &str) -> bool {
    email_pattern().is_match(input)
}

fn is_numeric(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }
    // f64 parsing also accepts "inf" and "NaN"; both fail the finite check.
    trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_empty() {
        assert_eq!(
            required("", None),
            Validation::Invalid("Must not be empty.".into())
        );
        assert_eq!(
            required("", Some("name")),
            Validation::Invalid("name must not be empty.".into())
        );
    }

    #[test]
    fn required_accepts_content() {
        assert!(required("x", None).is_valid());
        assert!(required("  padded  ", Some("name")).is_valid());
    }

    #[test]
    fn email_accepts_well_formed() {
        for addr in [
            "dev@example.com",
            "first.last@sub.example.org",
            "\"quoted name\"@example.io",
            "ops@[10.0.0.1]",
        ] {
            assert!(email(addr, None).is_valid(), "{addr} should be valid");
        }
    }

    #[test]
    fn email_rejects_malformed() {
        for addr in ["", "example.com", "dev@", "dev@localhost", "a b@example.com"] {
            assert!(!email(addr, None).is_valid(), "{addr} should be invalid");
        }
        assert_eq!(
            email("nope", Some("email")),
            Validation::Invalid("email is an invalid email address.".into())
        );
        assert_eq!(
            email("nope", None).message(),
            Some("Invalid email address.")
        );
    }

    #[test]
    fn numeric_accepts_finite_numbers() {
        for n in ["42", "-3.14", "+7", "1e3", ".5", " 12 ", "0"] {
            assert!(numeric(n, None).is_valid(), "{n:?} should be numeric");
        }
    }

    #[test]
    fn numeric_rejects_non_numbers() {
        for n in ["", "   ", "abc", "12abc", "NaN", "inf", "-infinity", "1e400"] {
            assert!(!numeric(n, None).is_valid(), "{n:?} should not be numeric");
        }
        assert_eq!(
            numeric("x", Some("port")).message(),
            Some("port must be numeric.")
        );
    }

    #[test]
    fn contains_matches_exactly() {
        let platforms = contains(["ios", "android"]);
        assert!(platforms.validate("ios", None).is_valid());
        assert!(!platforms.validate("IOS", None).is_valid());
        assert!(!platforms.validate("ios ", None).is_valid());
    }

    #[test]
    fn contains_lists_allowed_values() {
        let platforms = contains(["ios", "android"]);
        assert_eq!(
            platforms.validate("web", Some("platform")),
            Validation::Invalid("platform must be one of: (ios, android)".into())
        );
        assert_eq!(
            platforms.validate("web", None),
            Validation::Invalid("Must be one of: (ios, android)".into())
        );
    }

    #[test]
    fn contains_empty_rejects_everything() {
        let nothing = contains(Vec::<String>::new());
        assert_eq!(
            nothing.validate("", None),
            Validation::Invalid("Must be one of: ()".into())
        );
        assert!(!nothing.validate("anything", None).is_valid());
    }

    #[test]
    fn combine_first_failure_wins() {
        let rule = combine(vec![Box::new(required), Box::new(numeric)]);

        assert_eq!(rule.validate("", None), required("", None));
        assert_eq!(rule.validate("abc", None), numeric("abc", None));
        assert_eq!(rule.validate("42", None), Validation::Valid);
    }

    #[test]
    fn combine_passes_label_through() {
        let rule = combine(vec![Box::new(required), Box::new(email)]);
        assert_eq!(
            rule.validate("", Some("email")).message(),
            Some("email must not be empty.")
        );
    }

    #[test]
    fn combine_of_nothing_is_valid() {
        let rule = combine(Vec::new());
        assert!(rule.validate("", None).is_valid());
    }

    #[test]
    fn into_result_carries_message() {
        assert_eq!(required("a", None).into_result(), Ok(()));
        assert_eq!(
            required("", None).into_result(),
            Err("Must not be empty.".to_string())
        );
    }
}
