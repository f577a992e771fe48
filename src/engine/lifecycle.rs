//! engine::lifecycle
//!
//! Command lifecycle state machine.
//!
//! ```text
//! NotStarted -> PreRunChecked -> MetadataResolved -> PlatformEvaluated
//!     PlatformEvaluated -> BuildExecuted | BuildSkipped -> Delegated -> Done
//!     PlatformEvaluated -> Done                  (nothing to prepare)
//!     any non-terminal  -> FatalAborted
//! ```
//!
//! Every state entered is appended to the trace, so a finished lifecycle
//! records exactly which phases ran.

use serde::Serialize;
use thiserror::Error;

/// A phase of a command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    NotStarted,
    PreRunChecked,
    MetadataResolved,
    PlatformEvaluated,
    BuildExecuted,
    BuildSkipped,
    Delegated,
    Done,
    FatalAborted,
}

impl LifecycleState {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Done | LifecycleState::FatalAborted)
    }

    /// Check if `next` may follow this state.
    pub fn can_advance_to(&self, next: LifecycleState) -> bool {
        use LifecycleState::*;

        if next == FatalAborted {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (NotStarted, PreRunChecked)
                | (PreRunChecked, MetadataResolved)
                | (MetadataResolved, PlatformEvaluated)
                | (PlatformEvaluated, BuildExecuted)
                | (PlatformEvaluated, BuildSkipped)
                | (PlatformEvaluated, Done)
                | (BuildExecuted, Delegated)
                | (BuildSkipped, Delegated)
                | (Delegated, Done)
        )
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleState::NotStarted => "not started",
            LifecycleState::PreRunChecked => "pre-run checked",
            LifecycleState::MetadataResolved => "metadata resolved",
            LifecycleState::PlatformEvaluated => "platform evaluated",
            LifecycleState::BuildExecuted => "build executed",
            LifecycleState::BuildSkipped => "build skipped",
            LifecycleState::Delegated => "delegated",
            LifecycleState::Done => "done",
            LifecycleState::FatalAborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// An illegal lifecycle transition. Always a bug in the command.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot move from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: LifecycleState,
    pub to: LifecycleState,
}

/// Tracks the state of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifecycle {
    trace: Vec<LifecycleState>,
}

impl Lifecycle {
    /// Start a new lifecycle in `NotStarted`.
    pub fn new() -> Self {
        Self {
            trace: vec![LifecycleState::NotStarted],
        }
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.trace
            .last()
            .copied()
            .unwrap_or(LifecycleState::NotStarted)
    }

    /// Every state entered so far, starting with `NotStarted`.
    pub fn trace(&self) -> &[LifecycleState] {
        &self.trace
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] if `next` may not follow the current state.
    pub fn advance(&mut self, next: LifecycleState) -> Result<(), TransitionError> {
        let from = self.state();
        if !from.can_advance_to(next) {
            return Err(TransitionError { from, to: next });
        }
        tracing::debug!(%from, to = %next, "lifecycle");
        self.trace.push(next);
        Ok(())
    }

    /// Move to `FatalAborted` unless already terminal.
    pub fn abort(&mut self) {
        if !self.state().is_terminal() {
            tracing::debug!(from = %self.state(), "lifecycle aborted");
            self.trace.push(LifecycleState::FatalAborted);
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
