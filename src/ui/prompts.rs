//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompting is a collaborator behind the async [`Prompt`] trait so the
//! command lifecycle can be driven by scripted answers in tests.
//!
//! [`TerminalPrompt`] asks on the terminal. With `--confirm` every
//! confirmation is accepted without asking. In non-interactive mode the
//! prompt's default answer is used, so a command never blocks waiting for
//! input that cannot arrive.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// A yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Identifier of the answer (used for scripting and logs).
    pub name: String,
    /// Question shown to the user.
    pub message: String,
    /// Answer used when the user cannot be asked.
    pub default: bool,
}

impl ConfirmPrompt {
    /// Create a confirmation prompt that defaults to "no".
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            default: false,
        }
    }
}

/// Source of answers to interactive questions.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Ask a yes/no question.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool, PromptError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompt {
    interactive: bool,
    assume_yes: bool,
}

impl TerminalPrompt {
    /// Create a terminal prompt.
    ///
    /// `assume_yes` accepts every confirmation without asking.
    pub fn new(interactive: bool, assume_yes: bool) -> Self {
        Self {
            interactive,
            assume_yes,
        }
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool, PromptError> {
        if self.assume_yes {
            tracing::debug!(prompt = %prompt.name, "auto-confirmed by --confirm");
            return Ok(true);
        }
        if !self.interactive {
            tracing::debug!(
                prompt = %prompt.name,
                default = prompt.default,
                "non-interactive, using default answer"
            );
            return Ok(prompt.default);
        }

        let message = prompt.message.clone();
        let default = prompt.default;
        tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::new()
                .with_prompt(message)
                .default(default)
                .interact_opt()
        })
        .await
        .map_err(|e| PromptError::IoError(e.to_string()))?
        .map_err(|e| PromptError::IoError(e.to_string()))?
        .ok_or(PromptError::Cancelled)
    }
}

/// Prompt that answers from a pre-recorded script.
///
/// Answers are consumed in order; asking with an empty script fails with
/// [`PromptError::NotInteractive`]. Every question asked is recorded.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    answers: VecDeque<bool>,
    asked: Vec<ConfirmPrompt>,
}

impl ScriptedPrompt {
    /// Create a prompt that will give `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScriptedInner {
                answers: answers.into_iter().collect(),
                asked: Vec::new(),
            })),
        }
    }

    /// Questions asked so far.
    pub fn asked(&self) -> Vec<ConfirmPrompt> {
        self.inner.lock().unwrap().asked.clone()
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool, PromptError> {
        let mut inner = self.inner.lock().unwrap();
        inner.asked.push(prompt.clone());
        inner.answers.pop_front().ok_or(PromptError::NotInteractive)
    }
}
